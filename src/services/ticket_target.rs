use thiserror::Error;

use crate::domain::ratio::Ratio;
use crate::domain::ticket_target::TicketTarget;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TicketTargetError {
    #[error("ticket {ticket_id} not found in ticket list for board {board_id}")]
    NotFound { ticket_id: String, board_id: String },
    #[error("ticket target must be at least one ticket")]
    InvalidTarget,
}

/// Where the target ticket sits: the board's in progress and to do tickets in
/// priority order.
#[derive(Debug, Clone, Copy)]
pub struct BacklogLookup<'a> {
    pub board_id: &'a str,
    pub ticket_id: &'a str,
    pub tickets: &'a [String],
}

/// Estimates the number of tickets to complete before getting to the target ticket.
///
/// The low target is the ticket's backlog position (counting the ticket itself),
/// or `user_supplied_target` when no backlog lookup is given. The high target
/// inflates the low one by the bugs and newly discovered tickets we expect to
/// be created along the way.
pub fn calculate_ticket_target(
    bug_ratio: Ratio,
    discovery_ratio: Ratio,
    lookup: Option<BacklogLookup<'_>>,
    user_supplied_target: u64,
) -> Result<TicketTarget, TicketTargetError> {
    let (number_of_tickets_above_target, low_ticket_target) = match lookup {
        Some(lookup) => {
            let position = lookup
                .tickets
                .iter()
                .position(|ticket| ticket == lookup.ticket_id)
                .ok_or_else(|| TicketTargetError::NotFound {
                    ticket_id: lookup.ticket_id.to_string(),
                    board_id: lookup.board_id.to_string(),
                })?;
            // + 1 to include the target ticket itself.
            (position as u64, position as u64 + 1)
        }
        None => {
            if user_supplied_target == 0 {
                return Err(TicketTargetError::InvalidTarget);
            }
            (user_supplied_target - 1, user_supplied_target)
        }
    };

    let low = low_ticket_target as f64;
    let high = low + bug_ratio.correction(low) + discovery_ratio.correction(low);

    Ok(TicketTarget {
        number_of_tickets_above_target,
        low_ticket_target,
        high_ticket_target: high.round() as u64,
    })
}
