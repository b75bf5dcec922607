//! # Screens
//!
//! Plain-text rendition of each checkout stage.

use std::fmt;
use ticket_core::{CheckoutFlow, FormField, SeatState, Stage};

/// Shown for the `help` command
pub const HELP: &str = "\
Commands:
  email <address>      password <secret>     login
  ticket <vip|general|balcon>
  seat <A1..E5>        continue
  card-name <name>     card-number <digits>  expiry <MM/YY>   cvc <digits>
  pay                  logout                help             quit";

/// The screen for the flow's current stage
pub struct Screen<'a>(pub &'a CheckoutFlow);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flow = self.0;
        writeln!(f, "━━━━━━━━━━ 🎵 Concert Tickets ━━━━━━━━━━")?;

        match flow.stage() {
            Stage::Login => login(flow, f)?,
            Stage::Tickets => tickets(flow, f)?,
            Stage::Seats => seats(flow, f)?,
            Stage::Checkout => checkout(flow, f)?,
            Stage::Confirmation => confirmation(flow, f)?,
        }

        if flow.stage() != Stage::Login {
            writeln!(f, "\nLogged in as {} (logout)", flow.session().email)?;
        }
        Ok(())
    }
}

/// Render the screen for the flow's current stage
pub fn render(flow: &CheckoutFlow) -> String {
    Screen(flow).to_string()
}

fn login(flow: &CheckoutFlow, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let form = flow.form();
    writeln!(f, "Log in")?;
    writeln!(f, "  Email:    {}", placeholder(&form.email))?;
    writeln!(f, "  Password: {}", mask(&form.password))
}

fn tickets(flow: &CheckoutFlow, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Choose your ticket")?;
    for ticket in flow.catalog().tickets() {
        writeln!(f, "  🎫 {:<8} {}", ticket.ticket_type.as_str(), ticket.price)?;
    }
    Ok(())
}

fn seats(flow: &CheckoutFlow, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let layout = flow.catalog().seating();
    writeln!(f, "Choose your seat")?;
    if let Some(ticket) = flow.session().ticket {
        writeln!(f, "  Ticket: {} ({})", ticket.ticket_type, ticket.price)?;
    }

    write!(f, "\n     ")?;
    for col in 1..=layout.columns() {
        write!(f, "{:^4}", col)?;
    }
    writeln!(f)?;

    for row in layout.rows() {
        write!(f, "  {}  ", row)?;
        for seat in layout.row_seats(row) {
            let cell = match flow.seat_state(&seat) {
                SeatState::Available => "[ ]",
                SeatState::Selected => "[*]",
                SeatState::Unavailable => "[x]",
            };
            write!(f, "{} ", cell)?;
        }
        writeln!(f)?;
    }
    writeln!(f, "\n  [ ] available   [*] selected   [x] taken")?;

    match flow.session().seat {
        Some(seat) => writeln!(f, "  Selected seat: {} (continue)", seat),
        None => writeln!(f, "  No seat selected"),
    }
}

fn checkout(flow: &CheckoutFlow, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let session = flow.session();
    let form = flow.form();

    writeln!(f, "Checkout")?;
    if let Some(ticket) = session.ticket {
        writeln!(f, "  Ticket: {}", ticket.ticket_type)?;
        writeln!(f, "  Price:  {}", ticket.price)?;
    }
    if let Some(seat) = session.seat {
        writeln!(f, "  Seat:   {}", seat)?;
    }

    writeln!(f, "\n  Cardholder: {}", placeholder(form.get(FormField::CardName)))?;
    writeln!(f, "  Card:       {}", card_number(&form.card_number))?;
    writeln!(f, "  Expiry:     {}", placeholder(&form.card_expiry))?;
    writeln!(f, "  CVC:        {}", mask(&form.card_cvc))?;

    match (flow.is_processing(), session.ticket) {
        (true, _) => writeln!(f, "\n  ⏳ Processing..."),
        (false, Some(ticket)) => writeln!(f, "\n  💳 Pay {}", ticket.price),
        (false, None) => writeln!(f, "\n  💳 Pay"),
    }
}

fn confirmation(flow: &CheckoutFlow, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let session = flow.session();

    writeln!(f, "✅ Purchase confirmed!")?;
    if let Some(ticket) = session.ticket {
        writeln!(f, "  Ticket: {} ({})", ticket.ticket_type, ticket.price)?;
    }
    if let Some(seat) = session.seat {
        writeln!(f, "  Seat:   {}", seat)?;
    }
    writeln!(f, "  Name:   {}", flow.form().card_name.trim())?;
    writeln!(f, "\n  {}", flow.email_status().confirmation_message())
}

fn placeholder(value: &str) -> &str {
    if value.is_empty() {
        "_"
    } else {
        value
    }
}

fn mask(value: &str) -> String {
    if value.is_empty() {
        "_".to_string()
    } else {
        "*".repeat(value.chars().count())
    }
}

/// Show only the last four digits
fn card_number(value: &str) -> String {
    let digits: Vec<char> = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return "_".to_string();
    }
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("**** {}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use ticket_core::{
        BoxedNotifier, Catalog, ConfirmationNotifier, FlowSettings, NotificationAck,
        NotificationRequest, NotifyResult, TicketType,
    };

    struct Silent;

    #[async_trait::async_trait]
    impl ConfirmationNotifier for Silent {
        async fn notify(&self, _request: &NotificationRequest) -> NotifyResult<NotificationAck> {
            Ok(NotificationAck {
                id: None,
                data: serde_json::Value::Null,
            })
        }

        fn name(&self) -> &'static str {
            "silent"
        }
    }

    fn flow() -> CheckoutFlow {
        let notifier: BoxedNotifier = Arc::new(Silent);
        CheckoutFlow::new(Arc::new(Catalog::default()), notifier, FlowSettings::default())
    }

    #[test]
    fn test_login_masks_password() {
        let mut flow = flow();
        flow.set_field(FormField::Email, "a@b.com");
        flow.set_field(FormField::Password, "secret");

        let screen = Screen(&flow).to_string();
        assert!(screen.contains("a@b.com"));
        assert!(screen.contains("******"));
        assert!(!screen.contains("secret"));
    }

    #[test]
    fn test_tickets_screen_lists_prices() {
        let mut flow = flow();
        flow.set_field(FormField::Email, "a@b.com");
        flow.set_field(FormField::Password, "x");
        flow.login().unwrap();

        let screen = render(&flow);
        assert!(screen.contains("VIP"));
        assert!(screen.contains("$150"));
        assert!(screen.contains("Balcón"));
        assert!(screen.contains("$100"));
    }

    #[test]
    fn test_seat_grid_markers() {
        let mut flow = flow();
        flow.set_field(FormField::Email, "a@b.com");
        flow.set_field(FormField::Password, "x");
        flow.login().unwrap();
        flow.select_ticket(TicketType::General).unwrap();
        flow.select_seat("A1".parse().unwrap()).unwrap();

        let screen = render(&flow);
        let row_a = screen.lines().find(|l| l.starts_with("  A  ")).unwrap();
        assert_eq!(row_a.trim_end(), "  A  [*] [ ] [x] [ ] [ ]");
        assert!(screen.contains("Selected seat: A1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_and_confirmation() {
        let mut flow = flow();
        flow.set_field(FormField::Email, "a@b.com");
        flow.set_field(FormField::Password, "x");
        flow.login().unwrap();
        flow.select_ticket(TicketType::General).unwrap();
        flow.select_seat("B3".parse().unwrap()).unwrap();
        flow.continue_to_checkout().unwrap();
        flow.set_field(FormField::CardNumber, "4242 4242 4242 4242");

        let screen = render(&flow);
        assert!(screen.contains("**** 4242"));
        assert!(screen.contains("Pay $80"));

        flow.set_field(FormField::CardName, "Jane Doe");
        flow.submit_payment().await.unwrap().settle().await;

        let screen = render(&flow);
        assert!(screen.contains("Purchase confirmed"));
        assert!(screen.contains("Seat:   B3"));
        assert!(screen.contains("Confirmation email sent"));
    }
}
