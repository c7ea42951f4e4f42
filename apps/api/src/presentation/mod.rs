// Rendering helpers shared by the dashboard endpoints.

pub mod card;
pub mod covers;
pub mod icons;
