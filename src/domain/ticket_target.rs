use serde::Serialize;

/// Number of tickets to complete before, and including, the target ticket.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketTarget {
    pub number_of_tickets_above_target: u64,
    pub low_ticket_target: u64,
    pub high_ticket_target: u64,
}
