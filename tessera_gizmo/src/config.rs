// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for the controller and its frame.

use core::f64::consts::PI;

use tessera_scene::Rgba;

/// Colors used to draw the control frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameStyle {
    /// Outline, handle border, and center dot color.
    pub stroke: Rgba,
    /// Handle interior color.
    pub fill: Rgba,
    /// Outline width in query-space units.
    pub line_width: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            stroke: Rgba::from_hex(0x558ef0),
            fill: Rgba::WHITE,
            line_width: 1.0,
        }
    }
}

/// Controller configuration. All distances are in query-space units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Upper bound on the handle hit radius.
    pub max_handle_radius: f64,
    /// The handle radius is the frame diagonal divided by this, capped by `max_handle_radius`.
    pub handle_radius_divisor: f64,
    /// Width of the band around the frame that starts a rotation.
    pub rotate_band_width: f64,
    /// Rotation step applied while shift is held.
    pub rotation_snap: f64,
    /// Side length of the drawn handle squares.
    pub handle_size: f64,
    /// Radius of the drawn center dot.
    pub center_radius: f64,
    /// Drawing colors.
    pub frame_style: FrameStyle,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_handle_radius: 24.0,
            handle_radius_divisor: 3.0,
            rotate_band_width: 80.0,
            rotation_snap: PI / 12.0,
            handle_size: 8.0,
            center_radius: 5.0,
            frame_style: FrameStyle::default(),
        }
    }
}
