//! Upload page
//!
//! Left: drop zone. Clicking it opens the file picker; dropping a file on the
//! window selects it. Shows the selected file with a preview, or the inline
//! error.
//! Right: instructions with Reset and Generate Design.

use iced::widget::{button, column, container, image, mouse_area, row, text, Column, Space};
use iced::{Alignment, ContentFit, Element, Length, Padding};

use crate::{Message, UploadScreen};

/// Render the upload page
pub fn view(screen: &UploadScreen) -> Element<'_, Message> {
    row![view_drop_zone(screen), view_actions(screen)]
        .spacing(32)
        .padding(24)
        .align_y(Alignment::Center)
        .into()
}

fn view_drop_zone(screen: &UploadScreen) -> Element<'_, Message> {
    let uploader = &screen.uploader;

    let mut content: Column<'_, Message> = match (uploader.selected(), &screen.preview) {
        (Some(file), Some(preview)) => column![
            text(format!("File Uploaded: {}", file.name))
                .size(12)
                .color([0.1, 0.55, 0.25]),
            Space::new().height(8),
            image(preview.clone())
                .height(Length::Fixed(160.0))
                .content_fit(ContentFit::Contain),
        ],
        _ => column![text("Click to upload or drop your designs here")
            .size(13)
            .color([0.4, 0.4, 0.4])],
    };

    if let Some(error) = uploader.error() {
        content = content
            .push(Space::new().height(8))
            .push(text(error).size(12).color([0.8, 0.2, 0.2]));
    }

    let zone = container(content.align_x(Alignment::Center))
        .width(Length::Fill)
        .height(Length::Fixed(384.0))
        .padding(24)
        .align_x(iced::alignment::Horizontal::Center)
        .align_y(iced::alignment::Vertical::Center)
        .style(container::bordered_box);

    container(mouse_area(zone).on_press(Message::PickFile))
        .width(Length::FillPortion(1))
        .into()
}

fn view_actions(screen: &UploadScreen) -> Element<'_, Message> {
    let uploader = &screen.uploader;
    let enabled = uploader.controls_enabled();

    let buttons = row![
        button(text("Reset").size(12))
            .on_press_maybe(enabled.then_some(Message::Reset))
            .padding(Padding::from([6, 24]))
            .style(button::secondary),
        button(text(uploader.generate_label()).size(12))
            .on_press_maybe(enabled.then_some(Message::Generate))
            .padding(Padding::from([6, 24]))
            .style(button::primary),
    ]
    .spacing(16);

    column![
        text("Upload Your Sketch").size(24),
        Space::new().height(16),
        text("Upload your sketch and VasthraAI will generate a colored batik design for you.")
            .size(13),
        Space::new().height(24),
        buttons,
    ]
    .width(Length::FillPortion(1))
    .into()
}
