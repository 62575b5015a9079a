//! Radio tasks
//!
//! `radio_runner_task` services the CYW43 bus. `link_task` carries out
//! join and leave requests and publishes the link status.

use core::future::poll_fn;
use core::task::Poll;

use cyw43::JoinOptions;
use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_net_driver::{Driver, LinkState};
use embassy_time::{Duration, Timer};

use picodash_core::config::WifiCredentials;
use picodash_core::connectivity::ConnectivityError;
use picodash_core::traits::LinkStatus;

use crate::channels::LINK_REQUEST;
use crate::net::{publish, LinkRequest, RadioRunner};

/// How often an established link is checked
const LINK_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Runs the CYW43 bus and event loop
#[embassy_executor::task]
pub async fn radio_runner_task(runner: RadioRunner) -> ! {
    runner.run().await
}

/// Link task - joins and leaves networks on request
#[embassy_executor::task]
pub async fn link_task(mut control: cyw43::Control<'static>, mut device: cyw43::NetDriver<'static>) {
    info!("Link task started");

    let mut next: Option<LinkRequest> = None;

    loop {
        let request = match next.take() {
            Some(request) => request,
            None => LINK_REQUEST.wait().await,
        };

        match request {
            LinkRequest::Leave => {
                control.leave().await;
                publish(LinkStatus::Idle);
            }
            LinkRequest::Join(credentials) => {
                publish(LinkStatus::Joining);
                debug!("Joining '{}'", credentials.ssid.as_str());

                // A new request abandons the join in progress
                match select(join(&mut control, &credentials), LINK_REQUEST.wait()).await {
                    Either::First(Ok(())) => {
                        info!("Joined '{}'", credentials.ssid.as_str());
                        publish(LinkStatus::Up);
                        next = watch_link(&mut device).await;
                    }
                    Either::First(Err(e)) => publish(LinkStatus::Failed(e)),
                    Either::Second(request) => next = Some(request),
                }
            }
        }
    }
}

async fn join(
    control: &mut cyw43::Control<'static>,
    credentials: &WifiCredentials,
) -> Result<(), ConnectivityError> {
    let options = if credentials.password.is_empty() {
        JoinOptions::new_open()
    } else {
        JoinOptions::new(credentials.password.as_bytes())
    };

    control
        .join(credentials.ssid.as_str(), options)
        .await
        .map_err(|e| {
            warn!("Join failed with status {}", e.status);
            join_error(e.status)
        })
}

/// Map a CYW43 join status to a connectivity error
fn join_error(status: u32) -> ConnectivityError {
    match status {
        2 => ConnectivityError::Timeout,
        3 => ConnectivityError::NoNetwork,
        _ => ConnectivityError::AuthFailed,
    }
}

/// Wait while the link is up; returns the request that ended the wait,
/// or `None` if the link dropped
async fn watch_link(device: &mut cyw43::NetDriver<'static>) -> Option<LinkRequest> {
    loop {
        match select(LINK_REQUEST.wait(), Timer::after(LINK_CHECK_INTERVAL)).await {
            Either::First(request) => return Some(request),
            Either::Second(()) => {
                let state = poll_fn(|cx| Poll::Ready(device.link_state(cx))).await;
                if matches!(state, LinkState::Down) {
                    warn!("WiFi link lost");
                    publish(LinkStatus::Failed(ConnectivityError::LinkDropped));
                    return None;
                }
            }
        }
    }
}
