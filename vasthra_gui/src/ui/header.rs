//! Application header

use iced::widget::{row, text, Space};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Render the application header with the page title
pub fn view_header(page_title: &'static str) -> Element<'static, Message> {
    row![
        text("VasthraAI").size(28),
        Space::new().width(Length::Fill),
        text(page_title).size(14),
    ]
    .align_y(Alignment::Center)
    .into()
}
