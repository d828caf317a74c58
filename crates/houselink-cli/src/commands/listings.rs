use anyhow::Result;

use houselink_core::models::{BankRequestStatus, PropertyStatus};
use houselink_core::services::{BankRequestService, NewsTypeService, PropertyService};
use houselink_core::utils::truncate_string;
use houselink_core::PropertyFilter;

use super::{print_json, print_page_footer};
use crate::app::App;

/// Column width for titles in list output
const TITLE_WIDTH: usize = 32;

pub async fn properties(app: &App, query: &str) -> Result<()> {
    let filter = PropertyFilter::from_query(query);
    let page = PropertyService::new(app.api()).list(&filter).await?;

    for property in &page.items {
        println!(
            "{:<12} {:<9} {:<10} {:>16}  {:<width$}  {}",
            property.id,
            property.status,
            property.property_type,
            property.price_display(),
            truncate_string(&property.title, TITLE_WIDTH),
            property.location.summary(),
            width = TITLE_WIDTH,
        );
    }
    print_page_footer(&page);

    if filter.is_filtered() && page.has_next() {
        let mut next = filter.clone();
        next.set_page(filter.page + 1);
        println!("-- next: --query \"{}\"", next.to_query());
    }
    Ok(())
}

pub async fn property(app: &App, id: &str) -> Result<()> {
    let property = PropertyService::new(app.api()).get(id).await?;
    print_json(&property)
}

pub async fn moderate(app: &App, id: &str, status: PropertyStatus) -> Result<()> {
    app.require_admin()?;
    let property = PropertyService::new(app.api()).set_status(id, status).await?;
    println!("{} is now {}", property.id, property.status);
    Ok(())
}

pub async fn delete_property(app: &App, id: &str) -> Result<()> {
    app.require_session()?;
    PropertyService::new(app.api()).delete(id).await?;
    println!("Deleted {}", id);
    Ok(())
}

/// Counts for the admin landing screen, fetched concurrently
pub async fn dashboard(app: &App) -> Result<()> {
    app.require_admin()?;

    let properties = PropertyService::new(app.api());
    let bank_requests = BankRequestService::new(app.api());
    let news_types = NewsTypeService::new(app.api());

    let mut pending = PropertyFilter::default();
    pending.set_status(Some(PropertyStatus::Pending));
    pending.set_per_page(1);

    let (pending_listings, pending_requests, types) = futures::try_join!(
        properties.list(&pending),
        bank_requests.list(Some(BankRequestStatus::Pending), 1, 1),
        news_types.list(),
    )?;

    println!("Listings awaiting review:      {}", pending_listings.total);
    println!("Bank requests awaiting review: {}", pending_requests.total);
    println!("News categories:               {}", types.len());
    Ok(())
}
