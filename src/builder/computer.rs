//! `Computer` and its builder.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An immutable machine configuration.
///
/// Only obtainable through [`ComputerBuilder`] (or deserialization); the
/// fields are private and there are no setters.
///
/// ```rust
/// use solo::Computer;
///
/// let pc = Computer::builder("Intel i9", "32GB")
///     .graphics_card(true)
///     .bluetooth(true)
///     .build();
///
/// assert_eq!(
///     pc.to_string(),
///     "Computer [CPU=Intel i9, RAM=32GB, GraphicsCard=true, Bluetooth=true]"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Computer {
    cpu: String,
    ram: String,
    #[serde(default)]
    graphics_card: bool,
    #[serde(default)]
    bluetooth: bool,
}

impl Computer {
    /// Starts a builder with the two required fields.
    #[inline]
    pub fn builder(cpu: impl Into<String>, ram: impl Into<String>) -> ComputerBuilder {
        ComputerBuilder::new(cpu, ram)
    }

    /// The processor.
    #[inline]
    pub fn cpu(&self) -> &str {
        &self.cpu
    }

    /// The memory size.
    #[inline]
    pub fn ram(&self) -> &str {
        &self.ram
    }

    /// Whether a discrete graphics card is fitted.
    #[inline]
    pub fn has_graphics_card(&self) -> bool {
        self.graphics_card
    }

    /// Whether Bluetooth is fitted.
    #[inline]
    pub fn has_bluetooth(&self) -> bool {
        self.bluetooth
    }
}

impl fmt::Display for Computer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Computer [CPU={}, RAM={}, GraphicsCard={}, Bluetooth={}]",
            self.cpu, self.ram, self.graphics_card, self.bluetooth
        )
    }
}

/// Collects a [`Computer`]'s fields.
///
/// `build` takes the builder by value, so building twice from one builder
/// does not compile. Clone the builder first to stamp out several machines
/// from one template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "a builder does nothing until `build` is called"]
pub struct ComputerBuilder {
    cpu: String,
    ram: String,
    graphics_card: bool,
    bluetooth: bool,
}

impl ComputerBuilder {
    /// Starts a builder; optional parts default to absent.
    pub fn new(cpu: impl Into<String>, ram: impl Into<String>) -> Self {
        Self {
            cpu: cpu.into(),
            ram: ram.into(),
            graphics_card: false,
            bluetooth: false,
        }
    }

    /// Sets whether a graphics card is fitted.
    #[inline]
    pub fn graphics_card(mut self, fitted: bool) -> Self {
        self.graphics_card = fitted;
        self
    }

    /// Sets whether Bluetooth is fitted.
    #[inline]
    pub fn bluetooth(mut self, fitted: bool) -> Self {
        self.bluetooth = fitted;
        self
    }

    /// Produces the configured computer.
    #[must_use]
    pub fn build(self) -> Computer {
        Computer {
            cpu: self.cpu,
            ram: self.ram,
            graphics_card: self.graphics_card,
            bluetooth: self.bluetooth,
        }
    }
}
