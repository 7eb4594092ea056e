// SPDX-License-Identifier: GPL-3.0-only

//! Haptic capability: a fire-and-forget confirmation pulse

pub trait Haptics: Send + Sync {
    fn pulse(&self);
}

/// Terminal bell, the closest desktop analogue of a vibration pulse
pub struct TerminalBell;

impl Haptics for TerminalBell {
    fn pulse(&self) {
        use std::io::Write;
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

/// No-op haptics for headless runs and tests
pub struct NullHaptics;

impl Haptics for NullHaptics {
    fn pulse(&self) {}
}
