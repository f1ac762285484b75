use super::views::{BadgeView, CardView, TableRow};

/// Named slots of the host surface.
///
/// Implementations must tolerate instructions for slots they do not have
/// and ignore them silently.
pub trait SurfaceSink: Send + Sync {
    fn render_card(&self, slot: &str, card: &CardView);

    /// Replace the content of every card in `slots` with the same error
    /// message. Issued once per failed cycle.
    fn render_card_errors(&self, slots: &[String], message: &str);

    /// Toggle the transient emphasis of a card.
    fn set_card_flash(&self, slot: &str, on: bool);

    /// Replace the whole table body.
    fn render_table(&self, rows: &[TableRow]);

    fn render_badge(&self, badge: &BadgeView);

    fn render_last_sync(&self, label: &str);
}
