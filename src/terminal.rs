// SPDX-License-Identifier: GPL-3.0-only

//! Terminal front-end
//!
//! Renders the live preview and the review screen using Unicode half-block
//! characters for improved vertical resolution, and translates key presses
//! into workflow messages.

use crate::app::{AppModel, Message, Runtime, StatusKind, WorkflowState};
use crate::backends::camera::{CameraBackend, CameraFrame, SyntheticCamera};
use crate::backends::haptics::TerminalBell;
use crate::backends::media_library::PicturesLibrary;
use crate::backends::permissions::HostPermissions;
use crate::config::AppConfig;
use crate::constants::FRAME_CHANNEL_CAPACITY;
use crate::storage::{PersistedPhoto, PhotoStore};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::channel::mpsc;
use ratatui::{
    Terminal, backend::CrosstermBackend, buffer::Buffer, layout::Rect, style::Color,
    widgets::Widget,
};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Run the interactive terminal front-end
pub fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Review photo decoded for terminal rendering
struct ReviewImage {
    source: PersistedPhoto,
    frame: CameraFrame,
}

impl ReviewImage {
    fn load(photo: &PersistedPhoto) -> Option<Self> {
        let img = match image::open(&photo.path) {
            Ok(img) => img.to_rgb8(),
            Err(err) => {
                error!(path = %photo.path.display(), error = %err, "Failed to decode photo");
                return None;
            }
        };
        let (width, height) = img.dimensions();
        Some(Self {
            source: photo.clone(),
            frame: CameraFrame::rgb24(width, height, img.into_raw()),
        })
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let library_root = config
        .library_dir
        .clone()
        .unwrap_or_else(PicturesLibrary::default_root);
    let camera = Arc::new(SyntheticCamera::new());
    let model = AppModel::new(
        config,
        PhotoStore::at_default(),
        Some(camera.clone() as Arc<dyn CameraBackend>),
        Arc::new(PicturesLibrary::new(library_root.clone())),
        Arc::new(HostPermissions::new(library_root)),
        Arc::new(TerminalBell),
    );
    let mut runtime = Runtime::new(model);

    let (frame_tx, mut frame_rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
    let mut preview_started = false;
    let mut review_image: Option<ReviewImage> = None;

    info!(backend = camera.name(), "Terminal front-end started");

    loop {
        // Fold completed background work back into the model
        runtime.poll();

        if !preview_started && runtime.model().camera_allowed() {
            camera.start_preview(frame_tx.clone())?;
            preview_started = true;
        }

        // Drain available frames so the newest one wins
        while let Ok(Some(frame)) = frame_rx.try_next() {
            runtime.dispatch(Message::CameraFrame(frame));
        }

        // Decode the review photo once per store entry
        let model = runtime.model();
        if let Some(photo) = &model.review_photo {
            if review_image.as_ref().is_none_or(|r| r.source != *photo) {
                review_image = ReviewImage::load(photo);
            }
        } else {
            review_image = None;
        }

        terminal.draw(|f| {
            let area = f.area();

            // Reserve bottom line for status
            let view_area = Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: area.height.saturating_sub(1),
            };

            match model.workflow {
                WorkflowState::Blackout { .. } => {
                    f.render_widget(BlackoutCover, view_area);
                }
                WorkflowState::Preview => {
                    let view = FrameView {
                        frame: review_image.as_ref().map(|r| &r.frame),
                        placeholder: "No photo yet",
                    };
                    f.render_widget(view, view_area);
                }
                WorkflowState::Idle => {
                    let placeholder = if model.camera_allowed() {
                        "Waiting for camera..."
                    } else {
                        "Camera permissions not granted"
                    };
                    let view = FrameView {
                        frame: model.current_frame.as_deref(),
                        placeholder,
                    };
                    f.render_widget(view, view_area);
                }
            }

            let status_area = Rect {
                x: area.x,
                y: area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };
            f.render_widget(status_bar(model), status_area);
        })?;

        // Handle input with timeout for frame updates
        if event::poll(Duration::from_millis(16))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            if key.code == KeyCode::Char('q') {
                break;
            }

            if runtime.model().status.is_some() {
                runtime.dispatch(Message::ClearStatus);
            }

            let in_preview = runtime.model().workflow.is_preview();
            let message = match key.code {
                KeyCode::Char(' ') | KeyCode::Char('p') => Some(Message::Shutter),
                KeyCode::Char('f') => Some(Message::ToggleFlash),
                KeyCode::Char('w') => Some(Message::CycleWhiteBalance),
                KeyCode::Char('a') => Some(Message::ToggleAutoFocus),
                KeyCode::Char('c') => Some(Message::SwitchFacing),
                KeyCode::Char('r') => Some(Message::CycleAspectRatio),
                KeyCode::Char('+') | KeyCode::Char('=') => Some(Message::SetZoom(
                    runtime.model().camera_config.zoom + 0.1,
                )),
                KeyCode::Char('-') => Some(Message::SetZoom(
                    runtime.model().camera_config.zoom - 0.1,
                )),
                KeyCode::Char('g') => Some(Message::TogglePreview),
                KeyCode::Char('h') => {
                    let mut config = runtime.model().config.clone();
                    config.haptics_enabled = !config.haptics_enabled;
                    Some(Message::UpdateConfig(config))
                }
                KeyCode::Char('s') if in_preview => Some(Message::SaveToLibrary),
                KeyCode::Char('d') | KeyCode::Esc if in_preview => Some(Message::Discard),
                _ => None,
            };
            if let Some(message) = message {
                runtime.dispatch(message);
            }
        }
    }

    camera.stop_preview();
    Ok(())
}

fn status_bar(model: &AppModel) -> StatusBar<'_> {
    if let Some(notice) = &model.status {
        let bg = match notice.kind {
            StatusKind::Info => Color::DarkGray,
            StatusKind::Error => Color::Red,
        };
        return StatusBar {
            message: StatusText::Notice(&notice.text),
            bg,
        };
    }

    let message = match model.workflow {
        WorkflowState::Preview => StatusText::Hint("'s' save | 'd' discard | 'q' quit"),
        _ => StatusText::Owned(format!(
            "flash {} | wb {} | {} | {} | space: shutter | 'g' review | 'q' quit",
            model.camera_config.flash.label(),
            model.camera_config.white_balance.label(),
            model.camera_config.facing.label(),
            model.camera_config.aspect_ratio.label(),
        )),
    };
    StatusBar {
        message,
        bg: Color::DarkGray,
    }
}

/// Opaque cover shown while the sensor captures
struct BlackoutCover;

impl Widget for BlackoutCover {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(' ');
                    cell.set_bg(Color::Black);
                }
            }
        }
    }
}

/// Widget that renders a frame using half-block characters
struct FrameView<'a> {
    frame: Option<&'a CameraFrame>,
    placeholder: &'a str,
}

impl Widget for FrameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(frame) = self.frame else {
            let msg = self.placeholder;
            let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
            let y = area.y + area.height / 2;
            if y < area.y + area.height && x < area.x + area.width {
                buf.set_string(x, y, msg, ratatui::style::Style::default());
            }
            return;
        };

        // Each terminal cell displays 2 vertical pixels using half-blocks,
        // so the usable height is doubled before fitting the aspect ratio.
        let frame_aspect = frame.width as f64 / frame.height as f64;
        let term_width = area.width as f64;
        let term_height = (area.height * 2) as f64;

        let (display_width, display_height) = if term_width / term_height > frame_aspect {
            // Terminal is wider - fit to height
            let h = term_height;
            let w = h * frame_aspect;
            (w as u16, (h / 2.0) as u16)
        } else {
            // Terminal is taller - fit to width
            let w = term_width;
            let h = w / frame_aspect;
            (w as u16, (h / 2.0) as u16)
        };

        // Center the image
        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        let x_scale = frame.width as f64 / display_width.max(1) as f64;
        let y_scale = frame.height as f64 / (display_height.max(1) * 2) as f64;

        for ty in 0..display_height {
            for tx in 0..display_width {
                let term_x = x_offset + tx;
                let term_y = y_offset + ty;

                if term_x >= area.x + area.width || term_y >= area.y + area.height {
                    continue;
                }

                let src_x = (tx as f64 * x_scale) as u32;
                let src_y_top = (ty as f64 * 2.0 * y_scale) as u32;
                let src_y_bottom = ((ty as f64 * 2.0 + 1.0) * y_scale) as u32;

                let (tr, tg, tb) = frame.sample_rgb(src_x, src_y_top);
                let (br, bg, bb) = frame.sample_rgb(src_x, src_y_bottom);

                if let Some(cell) = buf.cell_mut((term_x, term_y)) {
                    cell.set_char('▀');
                    cell.set_fg(Color::Rgb(tr, tg, tb));
                    cell.set_bg(Color::Rgb(br, bg, bb));
                }
            }
        }
    }
}

enum StatusText<'a> {
    Notice(&'a str),
    Hint(&'static str),
    Owned(String),
}

impl StatusText<'_> {
    fn as_str(&self) -> &str {
        match self {
            StatusText::Notice(s) => s,
            StatusText::Hint(s) => s,
            StatusText::Owned(s) => s,
        }
    }
}

/// Status bar widget
struct StatusBar<'a> {
    message: StatusText<'a>,
    bg: Color,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(self.bg);
            }
        }

        // The message can carry filesystem paths, so cut on a character
        // boundary rather than a byte offset.
        let message = self.message.as_str();
        let text = match message.char_indices().nth(area.width as usize) {
            Some((idx, _)) => &message[..idx],
            None => message,
        };

        buf.set_string(
            area.x,
            area.y,
            text,
            ratatui::style::Style::default()
                .fg(Color::White)
                .bg(self.bg),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{StatusBar, StatusText};
    use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

    #[test]
    fn status_bar_truncates_multibyte_messages_safely() {
        // 19 columns lands mid-character in "é" when cut by byte offset
        let message = "Saved to /home/rené/Pictures/snapcam".to_string();
        let area = Rect::new(0, 0, 19, 1);
        let mut buf = Buffer::empty(area);

        let bar = StatusBar {
            message: StatusText::Owned(message),
            bg: Color::DarkGray,
        };
        bar.render(area, &mut buf);

        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "S");
    }

    #[test]
    fn status_bar_renders_short_messages_whole() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);

        let bar = StatusBar {
            message: StatusText::Hint("'s' save | 'd' discard"),
            bg: Color::DarkGray,
        };
        bar.render(area, &mut buf);

        assert_eq!(buf.cell((4, 0)).unwrap().symbol(), "s");
    }
}
