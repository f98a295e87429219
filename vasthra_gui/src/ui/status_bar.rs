//! Status Bar (Bottom)
//!
//! Displays:
//! - Generation service address
//! - Status messages

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use crate::Message;

/// Render the status bar
pub fn view_status_bar<'a>(service_url: &'a str, status: &'a str) -> Element<'a, Message> {
    row![
        text(format!("Service: {}", service_url)).size(10),
        Space::new().width(Length::Fill),
        text(status).size(10),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
