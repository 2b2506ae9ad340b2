use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Concrete UI event names a rendered element can bind a handler to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DomEvent {
    Click,
    DoubleClick,
    MouseEnter,
    MouseLeave,
    MouseMove,
    MouseOver,
    MouseOut,
    MouseUp,
    MouseDown,
    Blur,
    Change,
    Focus,
    Select,
    Submit,
    Reset,
    KeyDown,
    KeyPress,
    KeyUp,
    Drag,
    DragEnd,
    DragEnter,
    DragExit,
    DragLeave,
    DragStart,
    Drop,
    /// Only installed implicitly next to a drop handler.
    DragOver,
}

impl DomEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            DomEvent::Click => "onClick",
            DomEvent::DoubleClick => "onDoubleClick",
            DomEvent::MouseEnter => "onMouseEnter",
            DomEvent::MouseLeave => "onMouseLeave",
            DomEvent::MouseMove => "onMouseMove",
            DomEvent::MouseOver => "onMouseOver",
            DomEvent::MouseOut => "onMouseOut",
            DomEvent::MouseUp => "onMouseUp",
            DomEvent::MouseDown => "onMouseDown",
            DomEvent::Blur => "onBlur",
            DomEvent::Change => "onChange",
            DomEvent::Focus => "onFocus",
            DomEvent::Select => "onSelect",
            DomEvent::Submit => "onSubmit",
            DomEvent::Reset => "onReset",
            DomEvent::KeyDown => "onKeyDown",
            DomEvent::KeyPress => "onKeyPress",
            DomEvent::KeyUp => "onKeyUp",
            DomEvent::Drag => "onDrag",
            DomEvent::DragEnd => "onDragEnd",
            DomEvent::DragEnter => "onDragEnter",
            DomEvent::DragExit => "onDragExit",
            DomEvent::DragLeave => "onDragLeave",
            DomEvent::DragStart => "onDragStart",
            DomEvent::Drop => "onDrop",
            DomEvent::DragOver => "onDragOver",
        }
    }
}

impl fmt::Display for DomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse grouping of triggers, used for listing the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerCategory {
    Click,
    Pointer,
    Form,
    Keyboard,
    DragAndDrop,
    Lifecycle,
}

/// An abstract trigger declared by an action descriptor.
///
/// Names outside the vocabulary are preserved in [`Trigger::Unknown`] so they
/// still compare exactly in [`fire_triggers_of_kind`](crate::dispatch::fire_triggers_of_kind),
/// but they never resolve to an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger {
    Click,
    DoubleClick,
    MouseEnter,
    MouseLeave,
    MouseMove,
    MouseOver,
    MouseOut,
    MouseUp,
    MouseDown,
    Blur,
    Change,
    Focus,
    Select,
    Submit,
    Reset,
    KeyDown,
    KeyPress,
    KeyUp,
    Drag,
    DragEnd,
    DragEnter,
    DragExit,
    DragLeave,
    DragStart,
    Drop,
    /// Fires once when the component mounts.
    Load,
    /// Fires when the active route location changes.
    LocationChange,
    Unknown(String),
}

impl Trigger {
    /// Every known trigger, in vocabulary order.
    pub const KNOWN: [Trigger; 27] = [
        Trigger::Click,
        Trigger::DoubleClick,
        Trigger::MouseEnter,
        Trigger::MouseLeave,
        Trigger::MouseMove,
        Trigger::MouseOver,
        Trigger::MouseOut,
        Trigger::MouseUp,
        Trigger::MouseDown,
        Trigger::Blur,
        Trigger::Change,
        Trigger::Focus,
        Trigger::Select,
        Trigger::Submit,
        Trigger::Reset,
        Trigger::KeyDown,
        Trigger::KeyPress,
        Trigger::KeyUp,
        Trigger::Drag,
        Trigger::DragEnd,
        Trigger::DragEnter,
        Trigger::DragExit,
        Trigger::DragLeave,
        Trigger::DragStart,
        Trigger::Drop,
        Trigger::Load,
        Trigger::LocationChange,
    ];

    /// Parse a trigger name. Never fails: unrecognized names become `Unknown`.
    pub fn parse(name: &str) -> Self {
        match name {
            "onclick" => Trigger::Click,
            "ondoubleclick" => Trigger::DoubleClick,
            "onmouseenter" => Trigger::MouseEnter,
            "onmouseleave" => Trigger::MouseLeave,
            "onmousemove" => Trigger::MouseMove,
            "onmouseover" => Trigger::MouseOver,
            "onmouseout" => Trigger::MouseOut,
            "onmouseup" => Trigger::MouseUp,
            "onmousedown" => Trigger::MouseDown,
            "onblur" => Trigger::Blur,
            "onchange" => Trigger::Change,
            "onfocus" => Trigger::Focus,
            "onselect" => Trigger::Select,
            "onsubmit" => Trigger::Submit,
            "onreset" => Trigger::Reset,
            "onkeydown" => Trigger::KeyDown,
            "onkeypress" => Trigger::KeyPress,
            "onkeyup" => Trigger::KeyUp,
            "ondrag" => Trigger::Drag,
            "ondragend" => Trigger::DragEnd,
            "ondragenter" => Trigger::DragEnter,
            "ondragexit" => Trigger::DragExit,
            "ondragleave" => Trigger::DragLeave,
            "ondragstart" => Trigger::DragStart,
            "ondrop" => Trigger::Drop,
            "onload" => Trigger::Load,
            "onlocationchange" => Trigger::LocationChange,
            other => Trigger::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Trigger::Click => "onclick",
            Trigger::DoubleClick => "ondoubleclick",
            Trigger::MouseEnter => "onmouseenter",
            Trigger::MouseLeave => "onmouseleave",
            Trigger::MouseMove => "onmousemove",
            Trigger::MouseOver => "onmouseover",
            Trigger::MouseOut => "onmouseout",
            Trigger::MouseUp => "onmouseup",
            Trigger::MouseDown => "onmousedown",
            Trigger::Blur => "onblur",
            Trigger::Change => "onchange",
            Trigger::Focus => "onfocus",
            Trigger::Select => "onselect",
            Trigger::Submit => "onsubmit",
            Trigger::Reset => "onreset",
            Trigger::KeyDown => "onkeydown",
            Trigger::KeyPress => "onkeypress",
            Trigger::KeyUp => "onkeyup",
            Trigger::Drag => "ondrag",
            Trigger::DragEnd => "ondragend",
            Trigger::DragEnter => "ondragenter",
            Trigger::DragExit => "ondragexit",
            Trigger::DragLeave => "ondragleave",
            Trigger::DragStart => "ondragstart",
            Trigger::Drop => "ondrop",
            Trigger::Load => "onload",
            Trigger::LocationChange => "onlocationchange",
            Trigger::Unknown(name) => name,
        }
    }

    /// The event this trigger binds to, if any.
    ///
    /// Lifecycle and unknown triggers return `None`; they are never bound.
    pub fn event(&self) -> Option<DomEvent> {
        let event = match self {
            Trigger::Click => DomEvent::Click,
            Trigger::DoubleClick => DomEvent::DoubleClick,
            Trigger::MouseEnter => DomEvent::MouseEnter,
            Trigger::MouseLeave => DomEvent::MouseLeave,
            Trigger::MouseMove => DomEvent::MouseMove,
            Trigger::MouseOver => DomEvent::MouseOver,
            Trigger::MouseOut => DomEvent::MouseOut,
            Trigger::MouseUp => DomEvent::MouseUp,
            Trigger::MouseDown => DomEvent::MouseDown,
            Trigger::Blur => DomEvent::Blur,
            Trigger::Change => DomEvent::Change,
            Trigger::Focus => DomEvent::Focus,
            Trigger::Select => DomEvent::Select,
            Trigger::Submit => DomEvent::Submit,
            Trigger::Reset => DomEvent::Reset,
            Trigger::KeyDown => DomEvent::KeyDown,
            Trigger::KeyPress => DomEvent::KeyPress,
            Trigger::KeyUp => DomEvent::KeyUp,
            Trigger::Drag => DomEvent::Drag,
            Trigger::DragEnd => DomEvent::DragEnd,
            Trigger::DragEnter => DomEvent::DragEnter,
            Trigger::DragExit => DomEvent::DragExit,
            Trigger::DragLeave => DomEvent::DragLeave,
            Trigger::DragStart => DomEvent::DragStart,
            Trigger::Drop => DomEvent::Drop,
            Trigger::Load | Trigger::LocationChange | Trigger::Unknown(_) => return None,
        };
        Some(event)
    }

    pub fn category(&self) -> Option<TriggerCategory> {
        use Trigger::*;
        let category = match self {
            Click | DoubleClick => TriggerCategory::Click,
            MouseEnter | MouseLeave | MouseMove | MouseOver | MouseOut | MouseUp | MouseDown => {
                TriggerCategory::Pointer
            }
            Blur | Change | Focus | Select | Submit | Reset => TriggerCategory::Form,
            KeyDown | KeyPress | KeyUp => TriggerCategory::Keyboard,
            Drag | DragEnd | DragEnter | DragExit | DragLeave | DragStart | Drop => {
                TriggerCategory::DragAndDrop
            }
            Load | LocationChange => TriggerCategory::Lifecycle,
            Unknown(_) => return None,
        };
        Some(category)
    }

    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Trigger::Load | Trigger::LocationChange)
    }
}

impl FromStr for Trigger {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Trigger::parse(s))
    }
}

impl From<&str> for Trigger {
    fn from(name: &str) -> Self {
        Trigger::parse(name)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Trigger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Trigger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Trigger::parse(&name))
    }
}
