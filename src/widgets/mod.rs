pub mod container;
pub mod icon;
pub mod ripple;
pub mod widget;

/// Macro to implement common dirty flag methods for simple widgets.
///
/// Container and RippleView keep custom implementations because they
/// recurse to children.
macro_rules! impl_dirty_flags {
    () => {
        fn mark_dirty(&mut self, flags: $crate::widgets::ChangeFlags) {
            self.dirty_flags |= flags;
        }
        fn needs_layout(&self) -> bool {
            self.dirty_flags
                .contains($crate::widgets::ChangeFlags::NEEDS_LAYOUT)
        }
        fn needs_paint(&self) -> bool {
            self.dirty_flags
                .contains($crate::widgets::ChangeFlags::NEEDS_PAINT)
        }
        fn clear_dirty(&mut self) {
            self.dirty_flags = $crate::widgets::ChangeFlags::empty();
        }
    };
}
pub(crate) use impl_dirty_flags;

pub use container::{container, Container};
pub use icon::{icon, Icon};
pub use ripple::{CirclePaint, FillType, RippleCircle, RippleConfig, RippleView};
pub use widget::{ChangeFlags, Color, Rect, Widget};
