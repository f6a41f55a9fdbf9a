//! List the Search Console properties a service account can access.

use gsc_api::credentials::GscClient;
use gsc_api::sites;

/// Print every accessible property with its permission level.
///
/// The retrieval command needs the property URL exactly as Search
/// Console registers it; this is how the operator discovers it.
pub async fn run_sites(key_file: &str) -> anyhow::Result<()> {
    let client = GscClient::from_key_file(key_file).await?;
    let entries = sites::list_sites(&client).await?;

    println!("Sites the service account has access to:");
    if entries.is_empty() {
        println!("No sites found. The service account doesn't have access to any properties.");
    } else {
        for site in &entries {
            println!(
                "- {} (Permission level: {})",
                site.site_url, site.permission_level
            );
        }
    }

    println!();
    println!("Make sure to use one of these exact URLs in your data retrieval script.");
    Ok(())
}
