use colored::Colorize;
use reqwest::Client;

use crate::{error, lastfm::user};

/// Prints the taste compatibility of two users and the artists they
/// share.
pub async fn compare(first: String, second: String) {
    let client = Client::new();

    let (score, shared) = match user::compare(&client, &first, &second).await {
        Ok(result) => result,
        Err(e) => error!("Failed to compare {} and {}: {}", first, second, e),
    };

    let percent = (score * 100.0).round() as u32;
    println!();
    println!(
        "  {} and {} are {} compatible.",
        first.bold(),
        second.bold(),
        format!("{}%", percent).bold()
    );

    if !shared.is_empty() {
        println!();
        println!("  Artists in common:");
        for artist in shared {
            println!("   - {}", artist);
        }
    }
}
