//! # Checkout Flow
//!
//! Linear state machine driving a buyer through
//! `login → tickets → seats → checkout → confirmation`, with logout
//! resetting to `login` from anywhere.
//!
//! The confirmation email is a background task: payment settles, the
//! notification is spawned, and the flow advances to confirmation without
//! waiting for it. Its outcome is only reflected in [`EmailStatus`].

use crate::catalog::{Catalog, Ticket, TicketType};
use crate::error::{FlowError, FlowResult};
use crate::notification::{BoxedNotifier, NotificationRequest};
use crate::seat::{SeatId, SeatState};
use crate::session::{EmailStatus, FormField, FormInputs, Stage, UserSession};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Simulated payment settlement time
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(1500);

/// Flow configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    pub payment_delay: Duration,
}

impl FlowSettings {
    /// Load from environment variables (`PAYMENT_DELAY_MS`)
    pub fn from_env() -> Self {
        let payment_delay = std::env::var("PAYMENT_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_PAYMENT_DELAY);
        Self { payment_delay }
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            payment_delay: DEFAULT_PAYMENT_DELAY,
        }
    }
}

/// Result of clicking a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatSelection {
    /// The seat is now the buyer's choice
    Selected(SeatId),
    /// The seat is unavailable; nothing changed
    Ignored(SeatId),
}

/// Handle on the background confirmation-email task.
///
/// Dropping it is fine: the task records its own final status.
#[must_use = "settle() yields the final email status"]
#[derive(Debug)]
pub struct PendingNotification {
    handle: JoinHandle<EmailStatus>,
}

impl PendingNotification {
    /// Wait for the notification to finish; never returns `Pending`
    pub async fn settle(self) -> EmailStatus {
        match self.handle.await {
            Ok(status) => status,
            Err(e) => {
                error!("Confirmation email task failed: {}", e);
                EmailStatus::Error
            }
        }
    }
}

/// The checkout state machine.
///
/// Owns the buyer's session; every mutation goes through one of the
/// transition methods below. A failed transition leaves everything as it
/// was.
pub struct CheckoutFlow {
    catalog: Arc<Catalog>,
    notifier: BoxedNotifier,
    settings: FlowSettings,
    stage: Stage,
    session: UserSession,
    form: FormInputs,
    processing: bool,
    email_status: Arc<watch::Sender<EmailStatus>>,
}

impl CheckoutFlow {
    pub fn new(catalog: Arc<Catalog>, notifier: BoxedNotifier, settings: FlowSettings) -> Self {
        Self {
            catalog,
            notifier,
            settings,
            stage: Stage::Login,
            session: UserSession::default(),
            form: FormInputs::default(),
            processing: false,
            email_status: Arc::new(watch::channel(EmailStatus::Unset).0),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn form(&self) -> &FormInputs {
        &self.form
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn email_status(&self) -> EmailStatus {
        *self.email_status.borrow()
    }

    /// Watch email status changes for the current session
    pub fn subscribe_email_status(&self) -> watch::Receiver<EmailStatus> {
        self.email_status.subscribe()
    }

    /// True while a payment is being settled
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Update one form input
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value.into());
    }

    /// `login → tickets`; email and password must be non-empty.
    /// The password is never checked against anything.
    pub fn login(&mut self) -> FlowResult<()> {
        self.require(Stage::Login, "log in")?;

        let email = self.form.email.trim();
        if email.is_empty() || self.form.password.trim().is_empty() {
            return Err(FlowError::MissingCredentials);
        }

        self.session.email = email.to_string();
        self.stage = Stage::Tickets;
        info!("Logged in as {}", self.session.email);
        Ok(())
    }

    /// `tickets → seats`, remembering the chosen ticket
    pub fn select_ticket(&mut self, ticket_type: TicketType) -> FlowResult<Ticket> {
        self.require(Stage::Tickets, "select a ticket")?;

        let ticket = *self
            .catalog
            .ticket(ticket_type)
            .ok_or_else(|| FlowError::UnknownTicket(ticket_type.to_string()))?;

        self.session.ticket = Some(ticket);
        self.stage = Stage::Seats;
        debug!("Selected ticket {} at {}", ticket.ticket_type, ticket.price);
        Ok(ticket)
    }

    /// Pick a seat; unavailable seats are ignored
    pub fn select_seat(&mut self, seat: SeatId) -> FlowResult<SeatSelection> {
        self.require(Stage::Seats, "select a seat")?;

        let seating = self.catalog.seating();
        if !seating.contains(&seat) {
            return Err(FlowError::UnknownSeat(seat.to_string()));
        }
        if !seating.is_available(&seat) {
            debug!("Ignoring unavailable seat {}", seat);
            return Ok(SeatSelection::Ignored(seat));
        }

        self.session.seat = Some(seat);
        Ok(SeatSelection::Selected(seat))
    }

    /// `seats → checkout`; needs both a ticket and a seat
    pub fn continue_to_checkout(&mut self) -> FlowResult<()> {
        self.require(Stage::Seats, "continue to checkout")?;

        if self.session.ticket.is_none() {
            return Err(FlowError::NoTicketSelected);
        }
        if self.session.seat.is_none() {
            return Err(FlowError::NoSeatSelected);
        }

        self.stage = Stage::Checkout;
        Ok(())
    }

    /// `checkout → confirmation`.
    ///
    /// Waits out the simulated payment, then starts the confirmation email
    /// in the background and advances regardless of how that goes.
    #[instrument(skip(self), fields(email = %self.session.email))]
    pub async fn submit_payment(&mut self) -> FlowResult<PendingNotification> {
        self.require(Stage::Checkout, "submit payment")?;

        if self.processing {
            return Err(FlowError::AlreadyProcessing);
        }
        if self.form.card_name.trim().is_empty() {
            return Err(FlowError::MissingCardholderName);
        }
        let request = self.confirmation_request()?;

        self.processing = true;
        info!(
            "Processing payment: {} {} seat {}",
            request.ticket_type, request.ticket_price, request.seat_number
        );

        tokio::time::sleep(self.settings.payment_delay).await;

        let pending = self.spawn_notification(request);
        self.stage = Stage::Confirmation;
        self.processing = false;

        info!("Purchase confirmed");
        Ok(pending)
    }

    /// Back to `login` with everything cleared
    pub fn logout(&mut self) {
        info!("Logging out from {} stage", self.stage);

        self.session = UserSession::default();
        self.form = FormInputs::default();
        self.processing = false;

        // a fresh channel; the old one closes, so an abandoned attempt
        // can't report into the next session
        self.email_status.send_replace(EmailStatus::Unset);
        self.email_status = Arc::new(watch::channel(EmailStatus::Unset).0);

        self.stage = Stage::Login;
    }

    /// Display state of one seat
    pub fn seat_state(&self, seat: &SeatId) -> SeatState {
        if !self.catalog.seating().is_available(seat) {
            SeatState::Unavailable
        } else if self.session.seat.as_ref() == Some(seat) {
            SeatState::Selected
        } else {
            SeatState::Available
        }
    }

    /// Display state of every seat, row-major
    pub fn seat_states(&self) -> Vec<(SeatId, SeatState)> {
        self.catalog
            .seating()
            .seats()
            .map(|seat| (seat, self.seat_state(&seat)))
            .collect()
    }

    fn require(&self, stage: Stage, action: &'static str) -> FlowResult<()> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                stage: self.stage,
                action,
            })
        }
    }

    fn confirmation_request(&self) -> FlowResult<NotificationRequest> {
        let ticket = self.session.ticket.ok_or(FlowError::NoTicketSelected)?;
        let seat = self.session.seat.ok_or(FlowError::NoSeatSelected)?;

        Ok(NotificationRequest {
            to: self.session.email.clone(),
            customer_name: self.form.card_name.trim().to_string(),
            ticket_type: ticket.ticket_type.to_string(),
            ticket_price: ticket.price.as_decimal(),
            seat_number: seat.to_string(),
        })
    }

    fn spawn_notification(&self, request: NotificationRequest) -> PendingNotification {
        let notifier = Arc::clone(&self.notifier);

        self.email_status.send_replace(EmailStatus::Pending);

        // only the flow holds the sender; after logout the upgrade fails
        let status = Arc::downgrade(&self.email_status);
        let handle = tokio::spawn(async move {
            let name = notifier.name();
            let attempt = tokio::spawn(async move { notifier.notify(&request).await });

            let outcome = match attempt.await {
                Ok(Ok(ack)) => {
                    info!("Confirmation email accepted via {}: {:?}", name, ack.id);
                    EmailStatus::Success
                }
                Ok(Err(e)) => {
                    warn!("Confirmation email failed, purchase still confirmed: {}", e);
                    EmailStatus::Error
                }
                Err(e) => {
                    error!("Confirmation email task failed: {}", e);
                    EmailStatus::Error
                }
            };

            match status.upgrade() {
                Some(status) => {
                    status.send_replace(outcome);
                }
                None => debug!("Session ended before the email settled"),
            }
            outcome
        });

        PendingNotification { handle }
    }
}
