// SPDX-License-Identifier: MPL-2.0
//! The review screen: selected image, its batch strip, the batch actions and
//! an overview of every image still in review.

use crate::i18n::fluent::I18n;
use crate::media::metadata::ApertureDisplay;
use crate::review::{Batches, Command, Cursor, Image, ReviewState};
use crate::ui::design_tokens::{border, radius, sizing, spacing, typography};
use crate::ui::theming::ColorScheme;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{
    button, container, image, Column, Container, Row, Scrollable, Space, Text,
};
use iced::{alignment, Border, Color, ContentFit, Element, Length, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    OpenFolder,
    OpenFiles,
    Command(Command),
}

/// Context required to render the review screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a ReviewState,
    pub colors: &'a ColorScheme,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let idle = !ctx.state.is_writing();

    let mut layout = Column::new()
        .spacing(spacing::SM)
        .padding(spacing::MD)
        .width(Length::Fill)
        .height(Length::Fill)
        .push(toolbar(&ctx, idle));

    match ctx.state.cursor() {
        Some(cursor) => {
            let review = Column::new()
                .spacing(spacing::SM)
                .width(Length::Fill)
                .height(Length::Fill)
                .push(main_image(&ctx))
                .push(navigation_row(&ctx, idle))
                .push(batch_strip(&ctx, cursor, idle))
                .push(action_row(&ctx, idle));
            layout = layout.push(
                Row::new()
                    .spacing(spacing::SM)
                    .height(Length::Fill)
                    .push(review)
                    .push(overview(&ctx, cursor, idle)),
            );
        }
        None => {
            layout = layout.push(empty_state(ctx.i18n));
        }
    }

    layout
        .push(
            Text::new(ctx.i18n.tr("shortcuts-hint"))
                .size(typography::CAPTION)
                .color(ctx.colors.text_secondary),
        )
        .into()
}

/// Enables `message` only while no batch is being written.
fn action<'a>(label: String, message: Message, enabled: bool) -> Element<'a, Message> {
    button(Text::new(label).size(typography::BODY))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .padding([spacing::XS, spacing::SM])
        .on_press_maybe(enabled.then_some(message))
        .into()
}

fn toolbar<'a>(ctx: &ViewContext<'a>, idle: bool) -> Element<'a, Message> {
    let batches = ctx.state.batches();
    let mut row = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(action(ctx.i18n.tr("open-folder"), Message::OpenFolder, idle))
        .push(action(ctx.i18n.tr("open-files"), Message::OpenFiles, idle))
        .push(Space::new().width(Length::Fill));

    if !idle {
        row = row.push(
            Container::new(
                Text::new(ctx.i18n.tr("writing-status"))
                    .size(typography::BODY)
                    .color(ctx.colors.overlay_text),
            )
            .padding([spacing::XXS, spacing::XS])
            .style(banner_style(ctx.colors.overlay_background)),
        );
    }

    if let Some(cursor) = ctx.state.cursor() {
        row = row.push(
            Text::new(ctx.i18n.tr_with_args(
                "batch-position",
                &[
                    ("current", &(cursor.batch() + 1).to_string()),
                    ("total", &batches.len().to_string()),
                ],
            ))
            .size(typography::BODY),
        );
    }

    row.into()
}

fn main_image<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let Some(selected) = ctx.state.selected_image() else {
        return Space::new().into();
    };

    let aperture = match ctx.state.aperture() {
        ApertureDisplay::Ready(value) => ctx
            .i18n
            .tr_with_args("aperture-label", &[("value", value.as_str())]),
        ApertureDisplay::Pending | ApertureDisplay::Empty => ctx.i18n.tr("aperture-pending"),
    };

    let caption = Row::new()
        .spacing(spacing::MD)
        .push(Text::new(selected.file_name()).size(typography::BODY))
        .push(Text::new(aperture).size(typography::BODY))
        .push(
            Text::new(position_label(ctx.i18n, ctx.state))
                .size(typography::CAPTION)
                .color(ctx.colors.text_secondary),
        );

    Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .height(Length::Fill)
        .push(
            image(selected.handle().clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(caption)
        .into()
}

/// "Image 3 of 8" within the active batch.
fn position_label(i18n: &I18n, state: &ReviewState) -> String {
    let (current, total) = state
        .cursor()
        .zip(state.current_batch())
        .map_or((0, 0), |(cursor, batch)| (cursor.image() + 1, batch.len()));
    i18n.tr_with_args(
        "image-position",
        &[
            ("current", &current.to_string()),
            ("total", &total.to_string()),
        ],
    )
}

fn navigation_row<'a>(ctx: &ViewContext<'a>, idle: bool) -> Element<'a, Message> {
    let multiple_sets = ctx.state.batches().len() > 1;
    let nav = |key: &str, command: Command, enabled: bool| {
        action(ctx.i18n.tr(key), Message::Command(command), idle && enabled)
    };

    Row::new()
        .spacing(spacing::XS)
        .push(nav("previous-image", Command::MoveLeft, true))
        .push(nav("next-image", Command::MoveRight, true))
        .push(Space::new().width(Length::Fill))
        .push(nav("previous-set", Command::PreviousSet, multiple_sets))
        .push(nav("next-set", Command::NextSet, multiple_sets))
        .into()
}

fn batch_strip<'a>(ctx: &ViewContext<'a>, cursor: Cursor, idle: bool) -> Element<'a, Message> {
    let Some(batch) = ctx.state.batches().get(cursor.batch()) else {
        return Space::new().into();
    };
    let first = Batches::start_of(cursor.batch());
    let selection = ctx.colors.selection;

    let thumbnails = batch.iter().enumerate().map(|(local, img)| {
        let selected = local == cursor.image();
        let thumb = image(img.handle().clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fixed(sizing::THUMBNAIL))
            .height(Length::Fixed(sizing::THUMBNAIL));

        let framed = Container::new(thumb)
            .padding(border::WIDTH_SELECTED)
            .style(move |_theme: &Theme| thumbnail_style(selected, selection));

        button(framed)
            .padding(0)
            .style(button::text)
            .on_press_maybe(idle.then_some(Message::Command(Command::Select(first + local))))
            .into()
    });

    Container::new(Row::with_children(thumbnails).spacing(spacing::XS))
        .padding(spacing::XS)
        .width(Length::Fill)
        .style(surface_style(ctx.colors.surface_secondary))
        .into()
}

/// Every remaining image as `(global index, image)`, one row per set.
fn overview_rows(batches: &Batches) -> Vec<Vec<(usize, &Image)>> {
    batches
        .iter()
        .enumerate()
        .map(|(index, batch)| {
            let first = Batches::start_of(index);
            batch
                .iter()
                .enumerate()
                .map(|(local, img)| (first + local, img))
                .collect()
        })
        .collect()
}

/// Scrollable grid of the whole queue; clicking a thumbnail jumps to it,
/// switching sets when needed.
fn overview<'a>(ctx: &ViewContext<'a>, cursor: Cursor, idle: bool) -> Element<'a, Message> {
    let selection = ctx.colors.selection;

    let rows = overview_rows(ctx.state.batches())
        .into_iter()
        .map(|row| {
            let cells = row.into_iter().map(|(global, img)| {
                let selected = global == cursor.global();
                let thumb = image(img.handle().clone())
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fixed(sizing::OVERVIEW_THUMBNAIL))
                    .height(Length::Fixed(sizing::OVERVIEW_THUMBNAIL));

                button(
                    Container::new(thumb)
                        .padding(border::WIDTH_MD)
                        .style(move |_theme: &Theme| thumbnail_style(selected, selection)),
                )
                .padding(0)
                .style(button::text)
                .on_press_maybe(idle.then_some(Message::Command(Command::Select(global))))
                .into()
            });
            Row::with_children(cells).spacing(spacing::XXS).into()
        });

    let grid = Scrollable::new(Column::with_children(rows).spacing(spacing::XXS))
        .direction(Direction::Vertical(Scrollbar::new()))
        .width(Length::Fill)
        .height(Length::Fill);

    Container::new(
        Column::new()
            .spacing(spacing::XS)
            .push(
                Text::new(ctx.i18n.tr_with_args(
                    "overview-title",
                    &[("count", &ctx.state.batches().image_count().to_string())],
                ))
                .size(typography::CAPTION)
                .color(ctx.colors.text_secondary),
            )
            .push(grid),
    )
    .padding(spacing::XS)
    .width(Length::Fixed(sizing::OVERVIEW_WIDTH))
    .height(Length::Fill)
    .style(surface_style(ctx.colors.surface_secondary))
    .into()
}

fn action_row<'a>(ctx: &ViewContext<'a>, idle: bool) -> Element<'a, Message> {
    let act = |key: &str, command: Command| {
        action(ctx.i18n.tr(key), Message::Command(command), idle)
    };

    Row::new()
        .spacing(spacing::XS)
        .push(Space::new().width(Length::Fill))
        .push(act("save-batch", Command::Save))
        .push(act("reject-batch", Command::Reject))
        .push(act("accept-batch", Command::Accept))
        .into()
}

fn empty_state<'a>(i18n: &I18n) -> Element<'a, Message> {
    Container::new(Text::new(i18n.tr("empty-state")).size(typography::TITLE_MD))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn thumbnail_style(selected: bool, selection: Color) -> container::Style {
    container::Style {
        border: Border {
            color: if selected { selection } else { Color::TRANSPARENT },
            width: border::WIDTH_SELECTED,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}

fn surface_style(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(iced::Background::Color(color)),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn banner_style(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(iced::Background::Color(color)),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::ImageSequence;
    use crate::test_utils::create_png_files;
    use tempfile::tempdir;

    #[test]
    fn selected_thumbnail_is_outlined() {
        let style = thumbnail_style(true, Color::WHITE);
        assert_eq!(style.border.color, Color::WHITE);
        let style = thumbnail_style(false, Color::WHITE);
        assert_eq!(style.border.color, Color::TRANSPARENT);
    }

    #[test]
    fn position_label_counts_within_batch() {
        let dir = tempdir().expect("failed to create temp dir");
        let sequence = ImageSequence::from_files(create_png_files(dir.path(), 10));
        let state = ReviewState::new().load(&sequence).0;
        let state = state.dispatch(Command::Select(9)).0;

        let mut i18n = I18n::default();
        i18n.set_locale("en-US".parse().unwrap());

        assert_eq!(position_label(&i18n, &state), "Image 2 of 2");
    }

    #[test]
    fn overview_lists_every_image_by_global_index() {
        let dir = tempdir().expect("failed to create temp dir");
        let sequence = ImageSequence::from_files(create_png_files(dir.path(), 20));
        let state = ReviewState::new().load(&sequence).0;

        let rows = overview_rows(state.batches());

        let lengths: Vec<_> = rows.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![8, 8, 4]);
        let indices: Vec<_> = rows.iter().flatten().map(|(global, _)| *global).collect();
        assert_eq!(indices, (0..20).collect::<Vec<_>>());
        assert_eq!(rows[2][1].1.file_name(), "img_17.png");
    }

    #[test]
    fn picking_from_overview_switches_sets() {
        let dir = tempdir().expect("failed to create temp dir");
        let sequence = ImageSequence::from_files(create_png_files(dir.path(), 20));
        let state = ReviewState::new().load(&sequence).0;
        let (global, _) = overview_rows(state.batches())[2][1];

        let state = state.dispatch(Command::Select(global)).0;

        let cursor = state.cursor().expect("cursor after select");
        assert_eq!((cursor.batch(), cursor.image()), (2, 1));
        assert_eq!(
            state.selected_image().map(Image::file_name),
            Some("img_17.png")
        );
    }
}
