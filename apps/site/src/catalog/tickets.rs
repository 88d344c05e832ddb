use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::rich_text::{to_html, to_plain_text};
use crate::models::TicketCategory;

/// Active tickets only, ascending `sort_order`. Ties keep their fetched order.
pub fn visible_tickets(tickets: Vec<TicketCategory>) -> Vec<TicketCategory> {
    let mut visible: Vec<TicketCategory> = tickets.into_iter().filter(|t| t.is_active).collect();
    visible.sort_by_key(|t| t.sort_order);
    visible
}

/// A ticket ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct TicketCard {
    #[serde(flatten)]
    pub ticket: TicketCategory,
    pub display_price: String,
    pub description_html: String,
    pub description_text: String,
    pub on_sale: bool,
}

pub fn ticket_cards(tickets: Vec<TicketCategory>, now: DateTime<Utc>) -> Vec<TicketCard> {
    visible_tickets(tickets)
        .into_iter()
        .map(|ticket| TicketCard {
            display_price: ticket.display_price(),
            description_html: to_html(&ticket.description),
            description_text: to_plain_text(&ticket.description),
            on_sale: ticket.is_on_sale(now),
            ticket,
        })
        .collect()
}
