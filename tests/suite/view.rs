//! Rendering: each view phase drawn to a test backend.

use std::time::Duration;

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

use roster_engine::App;

use crate::common::{
    app_for, mount_delayed_items, mount_items, mount_status, sample_items, settle,
    start_items_mock,
};

fn render(app: &App) -> String {
    let backend = TestBackend::new(80, 12);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| roster_tui::draw(frame, app))
        .unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[tokio::test]
async fn loaded_view_renders_one_row_per_item_in_order() {
    let server = start_items_mock().await;
    mount_items(&server, sample_items()).await;

    let mut app = app_for(&server);
    app.mount();
    settle(&mut app).await;

    let text = render(&app);
    for heading in ["ID", "Type", "Title", "Created at"] {
        assert!(text.contains(heading), "missing heading {heading:?}");
    }
    assert!(text.contains("Hello"));
    assert!(text.contains("2024-01-01T00:00:00Z"));
    assert!(text.contains("Write tests"));
    assert!(text.contains("Ship it"));
    assert!(text.contains("3 items"));

    // Server order is preserved top to bottom.
    let first = text.find("Hello").unwrap();
    let second = text.find("Write tests").unwrap();
    let third = text.find("Ship it").unwrap();
    assert!(first < second && second < third);
}

#[tokio::test]
async fn empty_collection_renders_headers_only() {
    let server = start_items_mock().await;
    mount_items(&server, serde_json::json!([])).await;

    let mut app = app_for(&server);
    app.mount();
    settle(&mut app).await;

    let text = render(&app);
    assert!(text.contains("Created at"));
    assert!(text.contains("0 items"));
    assert!(!text.contains("Error:"));
}

#[tokio::test]
async fn loading_view_shows_indicator_and_no_table() {
    let server = start_items_mock().await;
    mount_delayed_items(&server, sample_items(), Duration::from_millis(500)).await;

    let mut app = app_for(&server);
    app.mount();
    app.process_fetch_outcomes();

    let text = render(&app);
    assert!(text.contains("Loading items..."));
    assert!(!text.contains("Created at"));
    assert!(!text.contains("Hello"));
}

#[tokio::test]
async fn http_error_renders_error_line() {
    let server = start_items_mock().await;
    mount_status(&server, 401).await;

    let mut app = app_for(&server);
    app.mount();
    settle(&mut app).await;

    let text = render(&app);
    assert!(text.contains("Error: HTTP 401"));
    assert!(!text.contains("Created at"));
}

#[tokio::test]
async fn network_error_renders_error_line() {
    let mut app = App::new(
        crate::common::offline_client(),
        roster_types::UiOptions::default(),
    );
    app.mount();
    settle(&mut app).await;

    let text = render(&app);
    assert!(text.contains("Error: "));
    assert!(!text.contains("Created at"));
}

#[tokio::test]
async fn scrolling_hides_rows_above_the_offset() {
    let server = start_items_mock().await;
    mount_items(&server, sample_items()).await;

    let mut app = app_for(&server);
    app.mount();
    settle(&mut app).await;
    app.scroll_down(1);

    let text = render(&app);
    assert!(!text.contains("Hello"), "scrolled-past row still visible");
    assert!(text.contains("Write tests"));
    assert!(text.contains("Created at"), "header stays visible");
}
