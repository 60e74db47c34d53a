//! M-PESA notification parser
//!
//! Recognizes outgoing payment confirmations such as:
//!
//! ```text
//! TIH5CRR635 Confirmed. Ksh65.00 paid to ACME STORES. on 17/9/25 at 6:56 PM.New M-PESA
//! balance is Ksh719.18. Transaction cost, Ksh0.00. Amount you can transact ...
//! ```
//!
//! Matching walks a fixed series of anchors ("Confirmed", the amount,
//! "sent|paid to", "on <date> at <time>", "balance is", "Transaction cost")
//! so a mismatch can be traced to the anchor that failed. Matching is
//! case-insensitive and tolerant of the punctuation and spacing variants
//! seen in real notifications. Text after the transaction cost is ignored.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::error::ParseError;
use crate::models::ParsedTransaction;

const CONFIRMED: &[u8] = b"confirmed";

/// Grammar anchors, in the order the scanner visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Anchor {
    Confirmed,
    Amount,
    Direction,
    Date,
    Time,
    Balance,
    Cost,
}

/// Field text captured by a structural match, before numeric conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFields<'a> {
    pub transaction_id: &'a str,
    pub amount: &'a str,
    pub recipient: &'a str,
    pub day: &'a str,
    pub month: &'a str,
    pub year: &'a str,
    pub hour: &'a str,
    pub minute: &'a str,
    pub pm: bool,
    pub balance: &'a str,
    pub fee: &'a str,
}

/// Parse one notification into a transaction
///
/// All-or-nothing: either every field converts or an error is returned.
pub fn parse(text: &str) -> Result<ParsedTransaction, ParseError> {
    let fields = scan(text).map_err(|anchor| {
        debug!(?anchor, "Text is not an M-PESA notification");
        ParseError::NotRecognized
    })?;
    convert(&fields)
}

/// Find the first structural match in `text`
///
/// On failure returns the furthest anchor any attempt reached, which is the
/// most useful hint about what was wrong with a near-miss.
pub fn scan(text: &str) -> Result<RawFields<'_>, Anchor> {
    let bytes = text.as_bytes();
    let mut furthest = Anchor::Confirmed;

    let occurrences: Vec<usize> = bytes
        .windows(CONFIRMED.len())
        .enumerate()
        .filter(|(_, w)| w.eq_ignore_ascii_case(CONFIRMED))
        .map(|(i, _)| i)
        .collect();

    for (i, &at) in occurrences.iter().enumerate() {
        let next = occurrences.get(i + 1).copied().unwrap_or(bytes.len());
        match match_at(text, at, next) {
            Ok(fields) => return Ok(fields),
            Err(anchor) => furthest = furthest.max(anchor),
        }
    }

    Err(furthest)
}

/// Normalize a recipient name: trim, drop trailing periods, collapse
/// whitespace runs to single spaces
pub fn normalize_recipient(raw: &str) -> String {
    raw.trim()
        .trim_end_matches('.')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a money figure such as `1,234.50` (without the `Ksh` prefix)
pub fn parse_money(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Try to match the whole sentence around the "Confirmed" found at `at`
///
/// The recipient must end before `limit`, the next "Confirmed" in the text.
fn match_at(text: &str, at: usize, limit: usize) -> Result<RawFields<'_>, Anchor> {
    let bytes = text.as_bytes();

    // "<TOKEN> Confirmed": whitespace then a word run right before the anchor
    let mut start = at;
    while start > 0 && bytes[start - 1].is_ascii_whitespace() {
        start -= 1;
    }
    if start == at {
        return Err(Anchor::Confirmed);
    }
    let token_end = start;
    while start > 0 && is_word(bytes[start - 1]) {
        start -= 1;
    }
    if start == token_end {
        return Err(Anchor::Confirmed);
    }
    let transaction_id = &text[start..token_end];

    let mut cur = Cursor::new(text, at + CONFIRMED.len());
    cur.optional(b'.');
    cur.ws().ok_or(Anchor::Amount)?;
    let amount = cur.money().ok_or(Anchor::Amount)?;

    cur.ws().ok_or(Anchor::Direction)?;
    if cur.literal("sent").is_none() {
        cur.literal("paid").ok_or(Anchor::Direction)?;
    }
    cur.ws().ok_or(Anchor::Direction)?;
    cur.literal("to").ok_or(Anchor::Direction)?;
    cur.ws().ok_or(Anchor::Direction)?;

    // The recipient runs lazily up to the first "on <date> at <time>" that
    // completes the sentence. It may contain periods but never a newline
    // or another "Confirmed".
    let recipient_start = cur.pos;
    let window = &bytes[recipient_start..limit.max(recipient_start)];
    let end = recipient_start + window.iter().position(|&b| b == b'\n').unwrap_or(window.len());
    let mut furthest = Anchor::Date;
    for on in recipient_start + 1..end {
        if !bytes[on - 1].is_ascii_whitespace() || !starts_with_ci(&bytes[on..], b"on") {
            continue;
        }
        let recipient = text[recipient_start..on]
            .trim_end_matches(|c: char| c.is_ascii_whitespace() || c == '.');
        if recipient.is_empty() {
            continue;
        }

        let mut tail = Cursor::new(text, on);
        match tail.sentence_tail() {
            Ok(t) => {
                return Ok(RawFields {
                    transaction_id,
                    amount,
                    recipient,
                    day: t.day,
                    month: t.month,
                    year: t.year,
                    hour: t.hour,
                    minute: t.minute,
                    pm: t.pm,
                    balance: t.balance,
                    fee: t.fee,
                })
            }
            Err(anchor) => furthest = furthest.max(anchor),
        }
    }

    Err(furthest)
}

fn convert(f: &RawFields<'_>) -> Result<ParsedTransaction, ParseError> {
    let amount = parse_money(f.amount)
        .filter(|a| *a > 0.0)
        .ok_or_else(|| ParseError::InvalidAmount(f.amount.to_string()))?;

    let recipient = normalize_recipient(f.recipient);
    let timestamp = compose_timestamp(f)?;

    let balance_after =
        parse_money(f.balance).ok_or_else(|| ParseError::InvalidBalance(f.balance.to_string()))?;
    let fee = parse_money(f.fee).ok_or_else(|| ParseError::InvalidFee(f.fee.to_string()))?;

    Ok(ParsedTransaction {
        transaction_id: f.transaction_id.to_string(),
        amount,
        recipient,
        timestamp,
        balance_after,
        fee,
    })
}

/// Build the timestamp from D/M/YY and a 12-hour clock
fn compose_timestamp(f: &RawFields<'_>) -> Result<NaiveDateTime, ParseError> {
    let written = format!(
        "{}/{}/{} {}:{} {}",
        f.day,
        f.month,
        f.year,
        f.hour,
        f.minute,
        if f.pm { "PM" } else { "AM" }
    );
    let invalid = || ParseError::InvalidDateTime(written.clone());

    // Every part is 1-2 ASCII digits by construction
    let day: u32 = f.day.parse().map_err(|_| invalid())?;
    let month: u32 = f.month.parse().map_err(|_| invalid())?;
    let year: i32 = f.year.parse().map_err(|_| invalid())?;
    let hour: u32 = f.hour.parse().map_err(|_| invalid())?;
    let minute: u32 = f.minute.parse().map_err(|_| invalid())?;

    if hour > 12 {
        return Err(invalid());
    }
    // Hour 0 reads the same as 12
    let hour24 = match (hour, f.pm) {
        (0 | 12, false) => 0,
        (0 | 12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    let date = NaiveDate::from_ymd_opt(2000 + year, month, day).ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(hour24, minute, 0).ok_or_else(invalid)?;
    Ok(NaiveDateTime::new(date, time))
}

fn starts_with_ci(haystack: &[u8], lit: &[u8]) -> bool {
    haystack
        .get(..lit.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(lit))
}

/// Everything after the recipient, starting at "on"
struct Tail<'a> {
    day: &'a str,
    month: &'a str,
    year: &'a str,
    hour: &'a str,
    minute: &'a str,
    pm: bool,
    balance: &'a str,
    fee: &'a str,
}

/// Byte cursor over ASCII anchors; all matched literals are ASCII so every
/// position it stops at is a char boundary
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// One or more whitespace characters
    fn ws(&mut self) -> Option<()> {
        (self.skip_ws() > 0).then_some(())
    }

    fn optional(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn byte(&mut self, b: u8) -> Option<()> {
        self.optional(b).then_some(())
    }

    /// Case-insensitive literal; `lit` must be lower-case ASCII
    fn literal(&mut self, lit: &str) -> Option<()> {
        if starts_with_ci(&self.text.as_bytes()[self.pos..], lit.as_bytes()) {
            self.pos += lit.len();
            Some(())
        } else {
            None
        }
    }

    fn digits(&mut self, min: usize, max: usize) -> Option<&'a str> {
        let start = self.pos;
        while self.pos - start < max && self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos - start < min {
            self.pos = start;
            return None;
        }
        Some(&self.text[start..self.pos])
    }

    /// `Ksh` followed by digits/commas and an optional fractional part;
    /// returns the figure without the prefix
    fn money(&mut self) -> Option<&'a str> {
        let start = self.pos;
        if self.literal("ksh").is_none() {
            return None;
        }
        let figure = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit() || b == b',') {
            self.pos += 1;
        }
        if self.pos == figure {
            self.pos = start;
            return None;
        }
        let bytes = self.text.as_bytes();
        if self.peek() == Some(b'.') && bytes.get(self.pos + 1).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        Some(&self.text[figure..self.pos])
    }

    fn sentence_tail(&mut self) -> Result<Tail<'a>, Anchor> {
        use Anchor::*;

        self.literal("on").ok_or(Date)?;
        self.ws().ok_or(Date)?;
        let day = self.digits(1, 2).ok_or(Date)?;
        self.byte(b'/').ok_or(Date)?;
        let month = self.digits(1, 2).ok_or(Date)?;
        self.byte(b'/').ok_or(Date)?;
        let year = self.digits(2, 2).ok_or(Date)?;

        self.ws().ok_or(Time)?;
        self.literal("at").ok_or(Time)?;
        self.ws().ok_or(Time)?;
        let hour = self.digits(1, 2).ok_or(Time)?;
        self.byte(b':').ok_or(Time)?;
        let minute = self.digits(2, 2).ok_or(Time)?;
        if self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        let pm = if self.literal("pm").is_some() {
            true
        } else {
            self.literal("am").ok_or(Time)?;
            false
        };

        self.optional(b'.');
        self.skip_ws();
        self.literal("new").ok_or(Balance)?;
        self.ws().ok_or(Balance)?;
        if self.literal("m-pesa").is_none() {
            self.literal("business").ok_or(Balance)?;
        }
        self.ws().ok_or(Balance)?;
        self.literal("balance").ok_or(Balance)?;
        self.ws().ok_or(Balance)?;
        self.literal("is").ok_or(Balance)?;
        self.ws().ok_or(Balance)?;
        let balance = self.money().ok_or(Balance)?;
        self.byte(b'.').ok_or(Balance)?;

        self.skip_ws();
        self.literal("transaction").ok_or(Cost)?;
        self.ws().ok_or(Cost)?;
        self.literal("cost").ok_or(Cost)?;
        self.optional(b',');
        self.skip_ws();
        let fee = self.money().ok_or(Cost)?;
        // A whole-number fee must end at a period or a word boundary; a
        // fractional part already closes the figure
        if !fee.contains('.') && self.peek().is_some_and(|b| b != b'.' && is_word(b)) {
            return Err(Cost);
        }

        Ok(Tail {
            day,
            month,
            year,
            hour,
            minute,
            pm,
            balance,
            fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "AB1 Confirmed. Ksh40.00 sent to Jane Doe on 17/9/25 at 6:56 PM. New M-PESA balance is Ksh100.00. Transaction cost, Ksh0.00.";

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let tx = parse(SAMPLE).unwrap();
        assert_eq!(tx.transaction_id, "AB1");
        assert_eq!(tx.amount, 40.0);
        assert_eq!(tx.recipient, "Jane Doe");
        assert_eq!(tx.timestamp, at(2025, 9, 17, 18, 56));
        assert_eq!(tx.balance_after, 100.0);
        assert_eq!(tx.fee, 0.0);
    }

    #[test]
    fn test_parse_real_variants() {
        let cases = [
            ("TIH5CRR635 Confirmed. Ksh65.00 paid to Anthony Wambua Muinde2. on 17/9/25 at 6:56 PM.New M-PESA balance is Ksh719.18. Transaction cost, Ksh0.00. Amount you can transact within the day is 498,760.00. Save frequent Tills for quick payment on M-PESA app https://bit.ly/mpesalnk",
             "TIH5CRR635", 65.0, "Anthony Wambua Muinde2"),
            ("TIH6CSP6KA Confirmed. Ksh40.00 sent to Co-operative Bank Money Transfer for account 1082111 on 17/9/25 at 6:59 PM New M-PESA balance is Ksh679.18. Transaction cost, Ksh0.00.",
             "TIH6CSP6KA", 40.0, "Co-operative Bank Money Transfer for account 1082111"),
            ("TII5I5YNFP Confirmed. Ksh35.00 paid to FELIX MWENDWA KIKOLE. on 18/9/25 at 7:18 PM.New M-PESA balance is Ksh644.18. Transaction cost, Ksh0.00. Amount you can transact within the day is 499,965.00.",
             "TII5I5YNFP", 35.0, "FELIX MWENDWA KIKOLE"),
            ("TII8I79A5O Confirmed. Ksh40.00 sent to Divinah  Nyabuto on 18/9/25 at 7:22 PM. New M-PESA balance is Ksh604.18. Transaction cost, Ksh0.00. Sign up for Lipa Na M-PESA Till online https://m-pesaforbusiness.co.ke",
             "TII8I79A5O", 40.0, "Divinah Nyabuto"),
            ("TIJ9N9U6HT Confirmed. Ksh25.00 sent to Caroline  Mwania on 19/9/25 at 7:05 PM. New M-PESA balance is Ksh579.18. Transaction cost, Ksh0.00. Amount you can transact within the day is 499,975.00.",
             "TIJ9N9U6HT", 25.0, "Caroline Mwania"),
        ];

        for (msg, id, amount, recipient) in cases {
            let tx = parse(msg).unwrap_or_else(|e| panic!("{} failed: {}", id, e));
            assert_eq!(tx.transaction_id, id);
            assert_eq!(tx.amount, amount);
            assert_eq!(tx.recipient, recipient);
        }
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse(SAMPLE).unwrap(), parse(SAMPLE).unwrap());
    }

    #[test]
    fn test_parse_case_insensitive() {
        let lower = SAMPLE.to_lowercase();
        let tx = parse(&lower).unwrap();
        assert_eq!(tx.transaction_id, "ab1");
        assert_eq!(tx.recipient, "jane doe");
        assert_eq!(tx.timestamp, at(2025, 9, 17, 18, 56));
    }

    #[test]
    fn test_parse_comma_amounts() {
        let msg = "QX9 Confirmed. Ksh1,234.50 paid to Big Shop on 1/2/24 at 9:05 AM. New business balance is Ksh12,000.00. Transaction cost, Ksh1,000.";
        let tx = parse(msg).unwrap();
        assert_eq!(tx.amount, 1234.50);
        assert_eq!(tx.balance_after, 12000.0);
        assert_eq!(tx.fee, 1000.0);
        assert_eq!(tx.timestamp, at(2024, 2, 1, 9, 5));

        let plain = msg.replace("Ksh1,234.50", "Ksh1234.50");
        assert_eq!(parse(&plain).unwrap().amount, tx.amount);
    }

    #[test]
    fn test_parse_spacing_variants() {
        // No space before AM/PM, no space before "New", no comma after "cost"
        let msg = "AB2 Confirmed Ksh10 sent to X on 5/6/25 at 12:01AM.New M-PESA balance is Ksh5. Transaction cost Ksh0";
        let tx = parse(msg).unwrap();
        assert_eq!(tx.amount, 10.0);
        assert_eq!(tx.recipient, "X");
        assert_eq!(tx.timestamp, at(2025, 6, 5, 0, 1));
        assert_eq!(tx.balance_after, 5.0);
    }

    #[test]
    fn test_parse_noon() {
        let msg = SAMPLE.replace("6:56 PM", "12:30 PM");
        assert_eq!(parse(&msg).unwrap().timestamp, at(2025, 9, 17, 12, 30));
    }

    #[test]
    fn test_parse_hour_zero() {
        let pm = SAMPLE.replace("6:56 PM", "0:56 PM");
        assert_eq!(parse(&pm).unwrap().timestamp, at(2025, 9, 17, 12, 56));
        let am = SAMPLE.replace("6:56 PM", "0:56 AM");
        assert_eq!(parse(&am).unwrap().timestamp, at(2025, 9, 17, 0, 56));
    }

    #[test]
    fn test_fee_followed_by_text() {
        let glued = SAMPLE.replace("Ksh0.00.", "Ksh12.50Amount you can transact");
        assert_eq!(parse(&glued).unwrap().fee, 12.50);

        // Without a fractional part the figure itself would run into the word
        let whole = SAMPLE.replace("Ksh0.00.", "Ksh12Amount");
        assert_eq!(parse(&whole), Err(ParseError::NotRecognized));
        let whole_period = SAMPLE.replace("Ksh0.00.", "Ksh12.Amount");
        assert_eq!(parse(&whole_period).unwrap().fee, 12.0);
    }

    #[test]
    fn test_recipient_trailing_periods() {
        let msg = SAMPLE.replace("Jane Doe", "ACME...");
        assert_eq!(parse(&msg).unwrap().recipient, "ACME");
        assert_eq!(normalize_recipient("ACME.."), "ACME");
        assert_eq!(normalize_recipient("A.B. Stores."), "A.B. Stores");
    }

    #[test]
    fn test_recipient_stops_at_next_notification() {
        let msg = format!("AB0 Confirmed. Ksh10.00 sent to BOB {}", SAMPLE);
        let tx = parse(&msg).unwrap();
        assert_eq!(tx.transaction_id, "AB1");
        assert_eq!(tx.recipient, "Jane Doe");
    }

    #[test]
    fn test_long_line_without_date() {
        let filler = " on and on".repeat(20_000);
        let msg = format!(
            "AB1 Confirmed. Ksh10 sent to X{} AB2 Confirmed. Ksh20 sent to Y{}",
            filler, filler
        );
        assert_eq!(scan(&msg).unwrap_err(), Anchor::Date);
    }

    #[test]
    fn test_parse_skips_leading_text() {
        let msg = format!("fwd from my phone: {}", SAMPLE);
        assert_eq!(parse(&msg).unwrap().transaction_id, "AB1");
    }

    #[test]
    fn test_recipient_with_on_inside_name() {
        let msg = SAMPLE.replace("Jane Doe", "Jane Ongeri on behalf");
        let tx = parse(&msg).unwrap();
        assert_eq!(tx.recipient, "Jane Ongeri on behalf");
    }

    #[test]
    fn test_not_recognized() {
        assert_eq!(parse("hello there"), Err(ParseError::NotRecognized));
        assert_eq!(parse(""), Err(ParseError::NotRecognized));
        // Incoming payments are a different sentence
        let received = "AB3 Confirmed. You have received Ksh100.00 from JOHN on 1/1/25 at 1:00 PM";
        assert_eq!(parse(received), Err(ParseError::NotRecognized));
    }

    #[test]
    fn test_recipient_cannot_span_lines() {
        let msg = SAMPLE.replace("Jane Doe", "Jane\nDoe");
        assert_eq!(parse(&msg), Err(ParseError::NotRecognized));
    }

    #[test]
    fn test_scan_reports_furthest_anchor() {
        assert_eq!(scan("just chatting").unwrap_err(), Anchor::Confirmed);
        assert_eq!(scan("AB1 Confirmed. soon").unwrap_err(), Anchor::Amount);
        assert_eq!(
            scan("AB1 Confirmed. Ksh40.00 received from Jane").unwrap_err(),
            Anchor::Direction
        );
        let no_cost = SAMPLE.replace("Transaction cost, Ksh0.00.", "");
        assert_eq!(scan(&no_cost).unwrap_err(), Anchor::Cost);
        let no_balance = SAMPLE.replace("New M-PESA balance", "Old balance");
        assert_eq!(scan(&no_balance).unwrap_err(), Anchor::Balance);
        let no_time = SAMPLE.replace("6:56 PM", "evening");
        assert_eq!(scan(&no_time).unwrap_err(), Anchor::Time);
    }

    #[test]
    fn test_scan_captures_raw_fields() {
        let raw = scan(SAMPLE).unwrap();
        assert_eq!(raw.transaction_id, "AB1");
        assert_eq!(raw.amount, "40.00");
        assert_eq!(raw.recipient, "Jane Doe");
        assert_eq!((raw.day, raw.month, raw.year), ("17", "9", "25"));
        assert_eq!((raw.hour, raw.minute, raw.pm), ("6", "56", true));
        assert_eq!(raw.balance, "100.00");
        assert_eq!(raw.fee, "0.00");
    }

    #[test]
    fn test_invalid_amount() {
        let msg = SAMPLE.replace("Ksh40.00", "Ksh,,");
        assert!(matches!(parse(&msg), Err(ParseError::InvalidAmount(_))));

        let zero = SAMPLE.replace("Ksh40.00", "Ksh0.00");
        assert!(matches!(parse(&zero), Err(ParseError::InvalidAmount(_))));
    }

    #[test]
    fn test_invalid_balance_and_fee() {
        let msg = SAMPLE.replace("Ksh100.00", "Ksh,");
        assert!(matches!(parse(&msg), Err(ParseError::InvalidBalance(_))));

        let msg = SAMPLE.replace("cost, Ksh0.00", "cost, Ksh,");
        assert!(matches!(parse(&msg), Err(ParseError::InvalidFee(_))));
    }

    #[test]
    fn test_invalid_datetime() {
        for (from, to) in [
            ("17/9/25", "31/9/25"),
            ("17/9/25", "17/13/25"),
            ("6:56 PM", "13:56 PM"),
            ("6:56 PM", "6:75 PM"),
        ] {
            let msg = SAMPLE.replace(from, to);
            assert!(
                matches!(parse(&msg), Err(ParseError::InvalidDateTime(_))),
                "expected invalid date/time for {}",
                to
            );
        }
    }

    #[test]
    fn test_normalize_recipient() {
        assert_eq!(normalize_recipient("  Jane   Doe. "), "Jane Doe");
        assert_eq!(normalize_recipient("A\tB"), "A B");
        let once = normalize_recipient(" Co-op  Bank for account 12. ");
        assert_eq!(normalize_recipient(&once), once);
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("1,234.50"), Some(1234.50));
        assert_eq!(parse_money("1234.50"), Some(1234.50));
        assert_eq!(parse_money(","), None);
    }
}
