use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use corelib::ConnectivityState;
use dashboard::format::ChangeClass;
use dashboard::render::{
    BadgeView, HeadlessSink, RenderConfig, Renderer, SlotContent, Tone,
};
use tokio::time::sleep;

use mock_feed::reading;

fn renderer_with(sink: &Arc<HeadlessSink>) -> Renderer {
    Renderer::new(RenderConfig::default(), sink.clone())
}

#[test]
fn pinned_reading_is_written_to_its_card() {
    let sink = Arc::new(HeadlessSink::new());
    let r = renderer_with(&sink);

    r.update_cards(&[reading("coinone", "BTC/KRW", 50_000_000.0, Some(1.23))]);

    let card = sink.card("btc-krw-price").expect("card written");
    assert_eq!(card.price, "50,000,000");
    assert_eq!(card.change, "+1.23%");
    assert_eq!(card.class, ChangeClass::Up);
    assert_eq!(r.slot_content("btc-krw-price"), Some(SlotContent::Data));
}

#[test]
fn negative_and_absent_changes_on_cards() {
    let sink = Arc::new(HeadlessSink::new());
    let r = renderer_with(&sink);

    r.update_cards(&[
        reading("binance", "BTCUSDT", 43_000.5, Some(-2.3)),
        reading("binance", "ETHUSDT", 2_300.0, None),
    ]);

    let btc = sink.card("btc-usdt-price").unwrap();
    assert_eq!(btc.change, "-2.30%");
    assert_eq!(btc.class, ChangeClass::Down);

    let eth = sink.card("eth-usdt-price").unwrap();
    assert_eq!(eth.change, "0.00%");
    assert_eq!(eth.class, ChangeClass::Neutral);
}

#[test]
fn unknown_pairs_skip_cards_but_fill_the_table() {
    let sink = Arc::new(HeadlessSink::new());
    let r = renderer_with(&sink);
    let snapshot = [
        reading("upbit", "XRP/KRW", 700.0, Some(0.5)),
        reading("coinone", "BTC/KRW", 1.0, None),
        // Known exchange, unpinned symbol.
        reading("binance", "SOLUSDT", 150.0, None),
    ];

    r.update_cards(&snapshot);
    r.update_table(&snapshot);

    let st = sink.state();
    assert_eq!(st.cards.len(), 1);
    assert!(st.cards.contains_key("btc-krw-price"));

    let symbols: Vec<_> = st.rows.iter().map(|row| row.symbol.as_str()).collect();
    assert_eq!(symbols, ["XRP/KRW", "BTC/KRW", "SOLUSDT"]);
}

#[test]
fn table_rows_carry_every_formatted_column() {
    let sink = Arc::new(HeadlessSink::new());
    let r = renderer_with(&sink);

    let mut btc = reading("coinone", "BTC/KRW", 50_000_000.0, Some(1.23));
    btc.high_price = Some(51_000_000.0);
    btc.low_price = Some(49_500_000.5);
    btc.volume = Some(1_500.0);
    btc.timestamp = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single();

    let unknown = reading("upbit", "XRP/KRW", 700.0, None);

    r.update_table(&[btc, unknown]);

    let rows = sink.rows();
    assert_eq!(rows.len(), 2);

    let row = &rows[0];
    assert_eq!(row.exchange, "COINONE");
    assert_eq!(row.exchange_tone, Tone::Primary);
    assert_eq!(row.price, "50,000,000");
    assert_eq!(row.change, "+1.23%");
    assert_eq!(row.class, ChangeClass::Up);
    assert_eq!(row.high, "51,000,000");
    assert_eq!(row.low, "49,500,000.5");
    assert_eq!(row.volume, "1.50K");
    assert_eq!(row.time.len(), 8);

    let row = &rows[1];
    assert_eq!(row.exchange, "UPBIT");
    assert_eq!(row.exchange_tone, Tone::Secondary);
    assert_eq!(row.change, "0.00%");
    assert_eq!(row.high, "0");
    assert_eq!(row.volume, "0");
    assert_eq!(row.time, "-");
}

#[test]
fn table_is_replaced_not_appended() {
    let sink = Arc::new(HeadlessSink::new());
    let r = renderer_with(&sink);

    r.update_table(&[
        reading("coinone", "BTC/KRW", 1.0, None),
        reading("coinone", "ETH/KRW", 2.0, None),
    ]);
    r.update_table(&[reading("binance", "BTCUSDT", 3.0, None)]);

    assert_eq!(sink.rows().len(), 1);
    assert_eq!(sink.table_renders(), 2);
}

#[test]
fn badge_follows_connectivity_state() {
    let sink = Arc::new(HeadlessSink::new());
    let r = renderer_with(&sink);

    r.update_connectivity_badge(ConnectivityState::Checking);
    r.update_connectivity_badge(ConnectivityState::Connected);
    r.update_connectivity_badge(ConnectivityState::Error);

    assert_eq!(
        sink.badges(),
        vec![
            BadgeView { label: "checking", tone: Tone::Warning },
            BadgeView { label: "connected", tone: Tone::Success },
            BadgeView { label: "error", tone: Tone::Danger },
        ]
    );
}

#[test]
fn fetch_error_only_lands_on_placeholder_cards_once() {
    let sink = Arc::new(HeadlessSink::new());
    let r = renderer_with(&sink);

    r.update_cards(&[reading("coinone", "BTC/KRW", 1.0, None)]);
    r.show_fetch_error("failed to load data: boom");

    assert!(sink.card("btc-krw-price").is_some());
    assert_eq!(sink.card_error("btc-krw-price"), None);
    for slot in ["eth-krw-price", "btc-usdt-price", "eth-usdt-price"] {
        assert_eq!(
            sink.card_error(slot).as_deref(),
            Some("failed to load data: boom")
        );
        assert_eq!(r.slot_content(slot), Some(SlotContent::Error));
    }
    assert_eq!(sink.error_renders(), 3);
    assert_eq!(sink.error_batches(), 1, "one instruction for all placeholders");

    r.show_fetch_error("failed to load data: again");
    assert_eq!(sink.error_renders(), 3, "overlay is one-shot");
    assert_eq!(sink.error_batches(), 1);
}

#[test]
fn data_replaces_an_error_overlay() {
    let sink = Arc::new(HeadlessSink::new());
    let r = renderer_with(&sink);

    r.show_fetch_error("down");
    r.update_cards(&[reading("binance", "ETHUSDT", 2_000.0, None)]);

    assert_eq!(sink.card_error("eth-usdt-price"), None);
    assert_eq!(sink.card("eth-usdt-price").unwrap().price, "2,000");
    assert_eq!(r.slot_content("eth-usdt-price"), Some(SlotContent::Data));
}

#[test]
fn missing_slots_are_tolerated() {
    let sink = Arc::new(HeadlessSink::with_card_slots(["btc-krw-price"]));
    let r = renderer_with(&sink);

    r.update_cards(&[
        reading("coinone", "BTC/KRW", 1.0, None),
        reading("coinone", "ETH/KRW", 2.0, None),
    ]);
    r.show_fetch_error("boom");

    let st = sink.state();
    assert_eq!(st.cards.len(), 1);
    assert!(st.card_errors.is_empty());
}

#[tokio::test(start_paused = true)]
async fn flash_reverts_after_its_delay() {
    let sink = Arc::new(HeadlessSink::new());
    let r = renderer_with(&sink);

    r.update_cards(&[reading("coinone", "BTC/KRW", 1.0, None)]);
    assert!(sink.is_flashing("btc-krw-price"));

    sleep(Duration::from_millis(499)).await;
    assert!(sink.is_flashing("btc-krw-price"));

    sleep(Duration::from_millis(2)).await;
    assert!(!sink.is_flashing("btc-krw-price"));
    assert_eq!(sink.flash_count("btc-krw-price"), 1);
}

#[tokio::test(start_paused = true)]
async fn flash_delay_comes_from_config() {
    let sink = Arc::new(HeadlessSink::new());
    let cfg = RenderConfig {
        flash: Duration::from_millis(100),
        ..RenderConfig::default()
    };
    let r = Renderer::new(cfg, sink.clone());

    r.update_cards(&[reading("binance", "BTCUSDT", 1.0, None)]);

    sleep(Duration::from_millis(101)).await;
    assert!(!sink.is_flashing("btc-usdt-price"));
}

#[test]
fn without_a_runtime_flash_reverts_immediately() {
    let sink = Arc::new(HeadlessSink::new());
    let r = renderer_with(&sink);

    r.update_cards(&[reading("coinone", "BTC/KRW", 1.0, None)]);

    assert!(!sink.is_flashing("btc-krw-price"));
    assert_eq!(sink.flash_count("btc-krw-price"), 1);
}

#[test]
fn last_sync_label_is_a_clock_time() {
    let sink = Arc::new(HeadlessSink::new());
    let r = renderer_with(&sink);

    r.update_last_sync_timestamp();

    let label = sink.last_sync().unwrap();
    assert_eq!(label.len(), 8);
    assert_eq!(label.matches(':').count(), 2);
}
