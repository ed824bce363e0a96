//! Container/layout collaborator trait.

/// Owns the scrollable container and applies slot geometry.
///
/// The orchestrator never touches coordinates directly; every geometric
/// effect of a window transition goes through this trait, so the engine
/// stays agnostic of the concrete container and its coordinate system.
/// Offsets are vertical positions within the scrollable content area, in
/// the same unit as the row height.
pub trait ListHost {
    /// The recyclable row object this host positions. Matches the
    /// adapter's slot type.
    type Slot;

    /// Current height of the scrollable viewport.
    fn viewport_height(&self) -> f32;

    /// Sets the fixed height of a slot. Called once per slot at creation.
    fn set_slot_height(&mut self, slot: &mut Self::Slot, height: f32);

    /// Moves a slot to a new vertical position within the content area.
    fn set_slot_offset(&mut self, slot: &mut Self::Slot, offset: f32);

    /// Current vertical position of a slot within the content area.
    fn slot_offset(&self, slot: &Self::Slot) -> f32;

    /// Inserts a newly created slot into the container.
    fn attach_slot(&mut self, slot: &mut Self::Slot);

    /// Resizes the scrollable content area.
    fn set_content_height(&mut self, height: f32);
}
