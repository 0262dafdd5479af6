use crate::model::BookingStatus;

#[derive(Debug, Clone)]
pub enum ServiceAction {
    /// Rebuild `rating` and `review_count` from the stored reviews.
    RefreshRating,
}

#[derive(Debug, Clone)]
pub enum BookingAction {
    /// Moves the booking to a new status if allowed. Returns the status it had before.
    SetStatus(BookingStatus),
}
