//! Families of related objects created through one factory.
//!
//! A [`GuiFactory`] hands out widgets that belong together. Code written
//! against the trait, like [`Application`], never names a concrete widget,
//! so swapping the factory swaps the whole family and mixing families is a
//! type error.

pub mod gui;

pub use gui::{
    Application, Button, Checkbox, GuiFactory, MacButton, MacCheckbox, MacFactory, WindowsButton,
    WindowsCheckbox, WindowsFactory,
};
