use iced::{
    Alignment::Center,
    Color, Element, Length, Theme, border,
    widget::{
        button, center, column, container, container::bordered_box, horizontal_space, mouse_area,
        opaque, row, scrollable, stack, text,
    },
};

use crate::models::{Badge, CardField, Tone};

/// One-line status message shown under a dashboard header.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastLine {
    pub text: String,
    pub tone: Tone,
}

impl ToastLine {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: format!("\u{2713} {}", text.into()),
            tone: Tone::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: format!("\u{2717} {}", text.into()),
            tone: Tone::Danger,
        }
    }
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Neutral => Color::from_rgb8(0x66, 0x66, 0x66),
        Tone::Pending => Color::from_rgb8(0xfb, 0xc0, 0x2d),
        Tone::Success => Color::from_rgb8(0x4c, 0xaf, 0x50),
        Tone::Warning => Color::from_rgb8(0xff, 0x98, 0x00),
        Tone::Danger => Color::from_rgb8(0xf4, 0x43, 0x36),
    }
}

pub fn toast<'a, Message: 'a>(line: ToastLine) -> Element<'a, Message> {
    let color = tone_color(line.tone);
    text(line.text)
        .style(move |_theme| text::Style { color: Some(color) })
        .into()
}

pub fn badge<'a, Message: 'a>(b: Badge) -> Element<'a, Message> {
    let color = tone_color(b.tone);
    container(text(b.text).size(12).style(|_theme| text::Style {
        color: Some(Color::WHITE),
    }))
    .style(move |_theme| {
        container::Style::default()
            .background(color)
            .border(border::rounded(4))
    })
    .padding(4)
    .into()
}

pub fn badges_row<'a, Message: 'a>(badges: Vec<Badge>) -> Element<'a, Message> {
    row(badges.into_iter().map(badge)).spacing(8).into()
}

pub fn field_line<'a, Message: 'a>(field: CardField) -> Element<'a, Message> {
    row![
        text(field.label).size(13).style(|theme: &Theme| text::Style {
            color: Some(theme.palette().text.scale_alpha(0.7)),
        }),
        text(field.value).size(13),
    ]
    .spacing(6)
    .into()
}

pub fn fields_column<'a, Message: 'a>(fields: Vec<CardField>) -> Element<'a, Message> {
    column(fields.into_iter().map(field_line)).spacing(4).into()
}

pub fn card_frame<'a, Message: 'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .style(|theme: &Theme| bordered_box(theme))
        .padding(14)
        .width(Length::Fill)
        .into()
}

/// Full-width placeholder shown instead of a card grid when a roster has
/// nothing to display.
pub fn empty_state<'a, Message: 'a>(title: &'a str, hint: &'a str) -> Element<'a, Message> {
    container(
        column![
            text(title).size(20),
            text(hint).size(13).style(|theme: &Theme| text::Style {
                color: Some(theme.palette().text.scale_alpha(0.6)),
            }),
        ]
        .spacing(8)
        .align_x(Center),
    )
    .style(|theme: &Theme| bordered_box(theme))
    .padding(40)
    .width(Length::Fill)
    .into()
}

/// Common dashboard chrome: title, logout, toast line, scrollable body.
pub fn dashboard<'a, Message: Clone + 'a>(
    title: &'a str,
    toast_line: Option<&'a ToastLine>,
    on_logout: Message,
    body: Element<'a, Message>,
) -> Element<'a, Message> {
    let header = row![
        text(title).size(26),
        horizontal_space(),
        button("Logout").style(button::secondary).on_press(on_logout),
    ]
    .spacing(20)
    .align_y(Center);

    let mut layout = column![header].spacing(16).padding(20);
    if let Some(line) = toast_line {
        layout = layout.push(toast(line.clone()));
    }
    layout
        .push(scrollable(body).height(Length::Fill))
        .into()
}

/// Overlay `top` above `base` with a dimmed, click-to-dismiss backdrop.
pub fn modal<'a, Message: Clone + 'a>(
    base: impl Into<Element<'a, Message>>,
    top: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    let base: Element<'a, Message> = base.into();
    let top: Element<'a, Message> = top.into();
    stack![
        base,
        opaque(
            mouse_area(center(opaque(top)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
