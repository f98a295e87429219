//! View Designs page
//!
//! Original sketch and generated design side by side, each with a loading
//! placeholder until its image arrives. New Design returns to upload;
//! Download saves the generated design.

use iced::widget::{button, column, container, image, row, text, Space};
use iced::{Alignment, ContentFit, Element, Length, Padding};

use vasthra_core::viewer::ImageKind;

use crate::{Message, ViewScreen};

/// Render the results page
pub fn view(screen: &ViewScreen) -> Element<'_, Message> {
    let gallery = row![
        view_image(screen, ImageKind::OriginalSketch),
        view_image(screen, ImageKind::GeneratedDesign),
    ]
    .spacing(16);

    let display = container(gallery)
        .width(Length::FillPortion(3))
        .padding(16)
        .style(container::bordered_box);

    row![display, view_actions(screen)]
        .spacing(32)
        .padding(24)
        .align_y(Alignment::Center)
        .into()
}

fn view_image(screen: &ViewScreen, kind: ImageKind) -> Element<'_, Message> {
    let body: Element<'_, Message> = match screen.handle(kind) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(320.0))
            .content_fit(ContentFit::Contain)
            .into(),
        None => text(kind.placeholder()).size(12).color([0.5, 0.5, 0.5]).into(),
    };

    column![text(kind.title()).size(16), Space::new().height(8), body]
        .width(Length::FillPortion(1))
        .align_x(Alignment::Center)
        .into()
}

fn view_actions(screen: &ViewScreen) -> Element<'_, Message> {
    let download_enabled = screen.viewer.can_download();

    let buttons = row![
        button(text("New Design").size(12))
            .on_press(Message::NewDesign)
            .padding(Padding::from([6, 24]))
            .style(button::secondary),
        button(text("Download").size(12))
            .on_press_maybe(download_enabled.then_some(Message::Download))
            .padding(Padding::from([6, 24]))
            .style(button::primary),
    ]
    .spacing(16);

    column![
        text("Your Batik Design").size(24),
        Space::new().height(16),
        text("Here is your generated batik design. You can download it or create a new design.")
            .size(13),
        Space::new().height(24),
        buttons,
    ]
    .width(Length::FillPortion(1))
    .into()
}
