use std::path::Path;

use anyhow::Result;

use houselink_core::filters::DEFAULT_PER_PAGE;
use houselink_core::models::BankRequestStatus;
use houselink_core::services::{
    BankRequestService, BankService, NewsService, NewsTypeService, SettingsService, UploadService, UserService,
};
use houselink_core::utils::{format_date, format_optional, format_thousands, truncate_string};

use super::{print_json, print_page_footer};
use crate::app::App;

pub async fn users(app: &App, keyword: Option<&str>, page: u32) -> Result<()> {
    app.require_admin()?;
    let users = UserService::new(app.api()).list(keyword, page, DEFAULT_PER_PAGE).await?;
    for user in &users.items {
        println!(
            "{:<12} {:<7} {:<28} {}",
            user.id,
            format!("{:?}", user.role).to_lowercase(),
            truncate_string(&user.name, 28),
            user.email
        );
    }
    print_page_footer(&users);
    Ok(())
}

pub async fn banks(app: &App, page: u32) -> Result<()> {
    let banks = BankService::new(app.api()).list(page, DEFAULT_PER_PAGE).await?;
    for bank in &banks.items {
        let rate = bank
            .interest_rate
            .map(|r| format!("{}%", r.normalize()))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:<24} {:>7}  {}",
            bank.id,
            truncate_string(&bank.name, 24),
            rate,
            format_optional(&bank.contact_phone, "")
        );
    }
    print_page_footer(&banks);
    Ok(())
}

pub async fn bank_requests(app: &App, status: Option<BankRequestStatus>, page: u32) -> Result<()> {
    app.require_admin()?;
    let requests = BankRequestService::new(app.api())
        .list(status, page, DEFAULT_PER_PAGE)
        .await?;
    for request in &requests.items {
        println!(
            "{:<12} {:<9} bank {:<10} user {:<10} {:>14}",
            request.id,
            request.status,
            request.bank_id,
            request.user_id,
            format_thousands(&request.amount.round().to_string())
        );
    }
    print_page_footer(&requests);
    Ok(())
}

pub async fn set_bank_request_status(app: &App, id: &str, status: BankRequestStatus) -> Result<()> {
    app.require_admin()?;
    let request = BankRequestService::new(app.api()).set_status(id, status).await?;
    println!("{} is now {}", request.id, request.status);
    Ok(())
}

pub async fn news(app: &App, news_type: Option<&str>, page: u32) -> Result<()> {
    let news = NewsService::new(app.api())
        .list(news_type, page, DEFAULT_PER_PAGE)
        .await?;
    for article in &news.items {
        let published = article
            .published_at
            .as_ref()
            .map(format_date)
            .unwrap_or_else(|| "draft".to_string());
        println!("{:<12} {:<12} {}", article.id, published, truncate_string(&article.title, 48));
    }
    print_page_footer(&news);
    Ok(())
}

pub async fn news_types(app: &App) -> Result<()> {
    for news_type in NewsTypeService::new(app.api()).list().await? {
        println!("{:<12} {}", news_type.id, news_type.name);
    }
    Ok(())
}

pub async fn settings(app: &App, refresh: bool) -> Result<()> {
    let settings = SettingsService::new(app.api())
        .get_cached(&app.cache, refresh)
        .await?;
    print_json(&settings)
}

pub async fn upload(app: &App, path: &Path) -> Result<()> {
    app.require_session()?;
    let uploaded = UploadService::new(app.api()).upload_file(path).await?;
    println!("{}", uploaded.url);
    Ok(())
}
