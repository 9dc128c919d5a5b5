use colored::Colorize;

use crate::{info, management::SearchHistory, success, warning};

/// Shows or clears the recent-username list.
pub async fn history(clear: bool) {
    let mut history = SearchHistory::load().await;

    if clear {
        history.clear();
        match history.persist().await {
            Ok(()) => success!("Search history cleared."),
            Err(e) => warning!("Could not clear search history: {}", e),
        }
        return;
    }

    if history.usernames().is_empty() {
        info!("No search history yet.");
        return;
    }

    for username in history.usernames() {
        if Some(username.as_str()) == history.last_username() {
            println!("  {} (last used)", username.bold());
        } else {
            println!("  {}", username);
        }
    }
}
