pub mod animation;
pub mod attributes;
pub mod error;
pub mod host;
pub mod layout;
pub mod renderer;
pub mod transform;
pub mod widgets;

pub use error::{Result, RippleError};
pub use host::{HostScreen, ScreenConfig};

pub mod prelude {
    pub use crate::animation::{AnimatorSet, PropertyAnimator, TimingFunction};
    pub use crate::attributes::{AttributeSet, DisplayMetrics};
    pub use crate::error::{Result, RippleError};
    pub use crate::host::{HostScreen, ScreenConfig};
    pub use crate::layout::{Constraints, Size};
    pub use crate::renderer::{Frame, PaintContext, SoftwareRenderer};
    pub use crate::transform::Transform;
    pub use crate::widgets::{
        container, icon, Color, Container, FillType, Icon, Rect, RippleConfig, RippleView, Widget,
    };
}
