//! Windows and macOS widget families.

/// A clickable push button.
pub trait Button {
    /// Draws the button, returning what was drawn.
    fn render(&self) -> String;
}

/// A two-state check box.
pub trait Checkbox {
    /// Draws the check box, returning what was drawn.
    fn render(&self) -> String;
}

/// Creates one family of widgets.
///
/// The associated types tie each factory to its own widgets, so an
/// [`Application`] built from a `MacFactory` can only ever hold Mac widgets.
pub trait GuiFactory {
    /// The family's button.
    type Button: Button;
    /// The family's check box.
    type Checkbox: Checkbox;

    /// Creates a button of this family.
    fn create_button(&self) -> Self::Button;

    /// Creates a check box of this family.
    fn create_checkbox(&self) -> Self::Checkbox;
}

/// Button drawn in the Windows style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowsButton;

impl Button for WindowsButton {
    fn render(&self) -> String {
        String::from("Rendering a Windows-style button")
    }
}

/// Check box drawn in the Windows style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowsCheckbox;

impl Checkbox for WindowsCheckbox {
    fn render(&self) -> String {
        String::from("Rendering a Windows-style checkbox")
    }
}

/// Button drawn in the macOS style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MacButton;

impl Button for MacButton {
    fn render(&self) -> String {
        String::from("Rendering a Mac-style button")
    }
}

/// Check box drawn in the macOS style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MacCheckbox;

impl Checkbox for MacCheckbox {
    fn render(&self) -> String {
        String::from("Rendering a Mac-style checkbox")
    }
}

/// Makes Windows widgets.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowsFactory;

impl GuiFactory for WindowsFactory {
    type Button = WindowsButton;
    type Checkbox = WindowsCheckbox;

    #[inline]
    fn create_button(&self) -> WindowsButton {
        WindowsButton
    }

    #[inline]
    fn create_checkbox(&self) -> WindowsCheckbox {
        WindowsCheckbox
    }
}

/// Makes macOS widgets.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacFactory;

impl GuiFactory for MacFactory {
    type Button = MacButton;
    type Checkbox = MacCheckbox;

    #[inline]
    fn create_button(&self) -> MacButton {
        MacButton
    }

    #[inline]
    fn create_checkbox(&self) -> MacCheckbox {
        MacCheckbox
    }
}

/// A client that only knows the factory's interface.
///
/// ```rust
/// use solo::factory::{Application, MacFactory, WindowsFactory};
///
/// let windows = Application::new(&WindowsFactory);
/// assert_eq!(windows.render_ui()[0], "Rendering a Windows-style button");
///
/// let mac = Application::new(&MacFactory);
/// assert_eq!(mac.render_ui()[1], "Rendering a Mac-style checkbox");
/// ```
#[derive(Debug)]
pub struct Application<F: GuiFactory> {
    button: F::Button,
    checkbox: F::Checkbox,
}

impl<F: GuiFactory> Application<F> {
    /// Builds the application's widgets from `factory`.
    pub fn new(factory: &F) -> Self {
        Self {
            button: factory.create_button(),
            checkbox: factory.create_checkbox(),
        }
    }

    /// Draws every widget, button first.
    pub fn render_ui(&self) -> Vec<String> {
        vec![self.button.render(), self.checkbox.render()]
    }
}
