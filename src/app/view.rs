// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::review::ReviewState;
use crate::ui::notifications::{self, Toast};
use crate::ui::review;
use crate::ui::theming::ColorScheme;
use iced::widget::{Container, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub review: &'a ReviewState,
    pub colors: &'a ColorScheme,
    pub notifications: &'a notifications::Manager,
}

/// Renders the review screen with the toast overlay on top.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let screen = review::view(review::ViewContext {
        i18n: ctx.i18n,
        state: ctx.review,
        colors: ctx.colors,
    })
    .map(Message::Review);

    let base = Container::new(screen)
        .width(Length::Fill)
        .height(Length::Fill);

    if !ctx.notifications.has_notifications() {
        return base.into();
    }

    let overlay = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new()
        .push(base)
        .push(overlay)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
