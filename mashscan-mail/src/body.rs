//! MIME body and header resolution for fetched messages.

use chrono::DateTime;
use mailparse::{DispositionType, MailHeaderMap, ParsedMail};

use mashscan_extract::MessageMeta;

/// Decoded header metadata for the extractor. Subjects arrive RFC2047-encoded
/// with a declared charset; `mailparse` decodes them, falling back to UTF-8.
pub fn message_meta(parsed: &ParsedMail<'_>) -> MessageMeta {
    let subject = parsed.headers.get_first_value("Subject");
    let date = parsed
        .headers
        .get_first_value("Date")
        .and_then(|value| DateTime::parse_from_rfc2822(value.trim()).ok());
    MessageMeta { subject, date }
}

/// Resolve the text the extractor should see: the first non-attachment
/// `text/plain` part of a multipart message, or the decoded payload of a
/// single-part one. `None` when the message has no usable text part.
pub fn plain_text_body(parsed: &ParsedMail<'_>) -> Option<String> {
    if parsed.subparts.is_empty() {
        return parsed.get_body().ok().filter(|body| !body.is_empty());
    }
    first_plain_part(parsed)
}

fn first_plain_part(part: &ParsedMail<'_>) -> Option<String> {
    if part.subparts.is_empty() {
        let disposition = part.get_content_disposition();
        if matches!(disposition.disposition, DispositionType::Attachment) {
            return None;
        }
        if part.ctype.mimetype.eq_ignore_ascii_case("text/plain") {
            return part.get_body().ok().filter(|body| !body.is_empty());
        }
        return None;
    }
    part.subparts.iter().find_map(first_plain_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_PART: &str = "From: Mashreq <noreply@mashreq.com>\r\n\
Subject: Transaction alert\r\n\
Date: Fri, 5 Jan 2024 14:30:00 +0400\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Mashreq Bank transaction body here\r\n";

    const MULTIPART: &str = "From: Mashreq <noreply@mashreq.com>\r\n\
Subject: =?utf-8?Q?Transaction=20notification?=\r\n\
Date: Fri, 5 Jan 2024 14:30:00 +0400\r\n\
Content-Type: multipart/mixed; boundary=\"sep\"\r\n\
\r\n\
--sep\r\n\
Content-Type: text/html; charset=utf-8\r\n\
\r\n\
<html><body>ignored html</body></html>\r\n\
--sep\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
Content-Disposition: attachment; filename=\"statement.txt\"\r\n\
\r\n\
attached text must be skipped\r\n\
--sep\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
the real body\r\n\
--sep--\r\n";

    #[test]
    fn test_single_part_body_is_decoded_payload() {
        let parsed = mailparse::parse_mail(SINGLE_PART.as_bytes()).unwrap();
        let body = plain_text_body(&parsed).unwrap();
        assert!(body.contains("Mashreq Bank transaction body here"));
    }

    #[test]
    fn test_multipart_picks_first_non_attachment_plain_part() {
        let parsed = mailparse::parse_mail(MULTIPART.as_bytes()).unwrap();
        let body = plain_text_body(&parsed).unwrap();
        assert!(body.contains("the real body"));
        assert!(!body.contains("attached text"));
        assert!(!body.contains("ignored html"));
    }

    #[test]
    fn test_meta_decodes_encoded_subject_and_date() {
        let parsed = mailparse::parse_mail(MULTIPART.as_bytes()).unwrap();
        let meta = message_meta(&parsed);
        assert_eq!(meta.subject.as_deref(), Some("Transaction notification"));
        let expected = DateTime::parse_from_rfc2822("Fri, 5 Jan 2024 14:30:00 +0400").unwrap();
        assert_eq!(meta.date, Some(expected));
    }

    #[test]
    fn test_missing_date_header_yields_no_meta_date() {
        let raw = "From: a@b.c\r\nSubject: hi\r\n\r\nbody\r\n";
        let parsed = mailparse::parse_mail(raw.as_bytes()).unwrap();
        let meta = message_meta(&parsed);
        assert!(meta.date.is_none());
        assert_eq!(meta.subject.as_deref(), Some("hi"));
    }

    #[test]
    fn test_html_only_multipart_has_no_usable_body() {
        let raw = "From: a@b.c\r\n\
Content-Type: multipart/alternative; boundary=\"sep\"\r\n\
\r\n\
--sep\r\n\
Content-Type: text/html\r\n\
\r\n\
<p>html only</p>\r\n\
--sep--\r\n";
        let parsed = mailparse::parse_mail(raw.as_bytes()).unwrap();
        assert!(plain_text_body(&parsed).is_none());
    }
}
