//! Inter-task communication channels
//!
//! Defines the static signals used for communication between Embassy tasks.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use picodash_core::connectivity::ConnectivityState;
use picodash_core::traits::LinkStatus;

use crate::net::LinkRequest;

/// Connectivity state, published by the connectivity task on every change
pub static CONNECTIVITY_STATE: Signal<CriticalSectionRawMutex, ConnectivityState> =
    Signal::new();

/// Join/leave requests for the link task (latest wins)
pub static LINK_REQUEST: Signal<CriticalSectionRawMutex, LinkRequest> = Signal::new();

/// Link status written by the link task, read by the backend without waiting
pub static LINK_STATUS: Mutex<CriticalSectionRawMutex, Cell<LinkStatus>> =
    Mutex::new(Cell::new(LinkStatus::Idle));
