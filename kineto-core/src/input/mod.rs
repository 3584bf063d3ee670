//! Button input pipeline
//!
//! Raw sense-line edges are debounced into clean transitions, which the
//! gesture classifier turns into gestures.

pub mod debounce;
pub mod gesture;

pub use debounce::{resolve, ButtonTransition, Debouncer, LineLevels, RawEdgeEvent, SenseLine};
pub use gesture::{
    classify_press, ClassifierStats, Gesture, GestureClassifier, Gestures, PressKind,
};
