//! Error types for sparkfx.
//!
//! This module provides error types for configuration loading, frame capture,
//! GPU initialization, and running the interactive window.

use std::fmt;

/// Errors that can occur while loading or validating effect configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write a configuration file.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Json(serde_json::Error),
    /// A color string could not be parsed.
    InvalidColor(String),
    /// A group's generation parameters cannot produce particles.
    InvalidGroup {
        /// Name of the effect the group belongs to, if known.
        effect: String,
        /// What is wrong with the parameters.
        reason: String,
    },
    /// A resize scale is not a positive, finite percentage.
    InvalidScale(f32),
    /// A sandbox lifespan setting is zero frames.
    ZeroLifespan(&'static str),
    /// The effect library has no entries.
    EmptyLibrary,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse config JSON: {}", e),
            ConfigError::InvalidColor(s) => write!(
                f,
                "Invalid color '{}'. Expected 'rgb(r, g, b)' or '#rrggbb'.",
                s
            ),
            ConfigError::InvalidGroup { effect, reason } => {
                write!(f, "Invalid particle group in '{}': {}", effect, reason)
            }
            ConfigError::InvalidScale(scale) => {
                write!(f, "Invalid scale {}. Scale is a percentage greater than 0.", scale)
            }
            ConfigError::ZeroLifespan(field) => {
                write!(f, "Invalid {}: effects must last at least one frame.", field)
            }
            ConfigError::EmptyLibrary => write!(f, "Effect library is empty. Add at least one effect."),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Errors that can occur when saving a frame to disk.
#[derive(Debug)]
pub enum CaptureError {
    /// Failed to encode the image.
    Image(image::ImageError),
    /// Failed to create the capture directory or file.
    Io(std::io::Error),
    /// The pixel buffer does not match the framebuffer dimensions.
    SizeMismatch {
        /// Framebuffer width in pixels.
        width: u32,
        /// Framebuffer height in pixels.
        height: u32,
    },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Image(e) => write!(f, "Failed to encode frame: {}", e),
            CaptureError::Io(e) => write!(f, "Failed to write frame: {}", e),
            CaptureError::SizeMismatch { width, height } => {
                write!(f, "Pixel buffer does not match a {}x{} frame", width, height)
            }
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptureError::Image(e) => Some(e),
            CaptureError::Io(e) => Some(e),
            CaptureError::SizeMismatch { .. } => None,
        }
    }
}

impl From<image::ImageError> for CaptureError {
    fn from(e: image::ImageError) -> Self {
        CaptureError::Image(e)
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(e: std::io::Error) -> Self {
        CaptureError::Io(e)
    }
}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the interactive sandbox.
#[derive(Debug)]
pub enum RunError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            RunError::Window(e) => write!(f, "Failed to create window: {}", e),
            RunError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::EventLoop(e) => Some(e),
            RunError::Window(e) => Some(e),
            RunError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for RunError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for RunError {
    fn from(e: winit::error::OsError) -> Self {
        RunError::Window(e)
    }
}

impl From<GpuError> for RunError {
    fn from(e: GpuError) -> Self {
        RunError::Gpu(e)
    }
}
