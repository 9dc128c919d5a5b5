use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    collage::render,
    error, info,
    management::SearchHistory,
    pipeline::{self, Session},
    success,
    types::{ItemKind, Period, Template},
    warning,
};

/// Everything the collage subcommand needs, already parsed.
pub struct CollageRequest {
    pub username: Option<String>,
    pub kind: ItemKind,
    pub period: Period,
    pub width: u32,
    pub height: u32,
    pub template: Template,
    pub show_text: bool,
    pub enrich: bool,
    pub output: Option<PathBuf>,
}

pub async fn collage(request: CollageRequest) {
    let CollageRequest {
        username,
        kind,
        period,
        width,
        height,
        template,
        show_text,
        enrich,
        output,
    } = request;

    let mut history = SearchHistory::load().await;

    let username = match username.or_else(|| history.last_username().map(str::to_string)) {
        Some(u) => u,
        None => {
            error!("No username given and no previous one to fall back on.");
        }
    };

    let session = match Session::new(&username, kind, period, width, height, template) {
        Ok(session) => session,
        Err(e) => error!("{}", e),
    };
    let session = if enrich {
        session
    } else {
        session.without_enrichment()
    };

    let pb = spinner(format!(
        "Fetching top {} for {} ({})...",
        kind,
        session.username(),
        period.label()
    ));

    let client = Client::new();
    let result = match pipeline::generate(&client, &session).await {
        Ok(result) => result,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to build collage: {}", e);
        }
    };
    pb.finish_and_clear();

    history.record(session.username());
    if let Err(e) = history.persist().await {
        warning!("Could not save search history: {}", e);
    }

    if result.empty {
        warning!(
            "No artwork available for {}'s top {} in this period. Nothing to render.",
            session.username(),
            kind
        );
        return;
    }

    info!(
        "Placed {} of {} requested {} into a {}x{} grid.",
        result.cells.len(),
        session.grid().limit(),
        kind,
        session.grid().width(),
        session.grid().height()
    );

    let pb = spinner(format!("Rendering {} collage...", template));
    match render::render_collage(&client, &result, show_text, output).await {
        Ok(path) => {
            pb.finish_and_clear();
            success!("Collage saved to {}", path.display());
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Rendering failed: {}", e);
        }
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
