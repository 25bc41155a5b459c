use bytes::Bytes;
use std::net::Ipv4Addr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::Instrument;

use dns_wire::protocol::types::*;

use crate::net_util::send_udp_bytes;

/// The address which every name resolves to when there is no
/// upstream nameserver.
pub const FIXED_ADDRESS: Ipv4Addr = Ipv4Addr::new(192, 168, 0, 6);

/// How queries are answered.
pub enum Mode {
    /// Every name resolves to the fixed address.
    Fixed,
    /// Queries are relayed, question by question, to an upstream
    /// nameserver over a single shared socket.
    Forwarding { upstream: Mutex<UdpSocket> },
}

/// Build the response to a query.
pub async fn resolve(mode: &Mode, query: &Message) -> Option<Message> {
    match mode {
        Mode::Fixed => Some(resolve_fixed(query)),
        Mode::Forwarding { upstream } => {
            resolve_forwarding(upstream, query)
                .instrument(tracing::error_span!("resolve_forwarding", id = %query.header.id))
                .await
        }
    }
}

/// Answer every question in the query with the fixed address.
///
/// Whatever was actually asked, the question is rewritten to an
/// A-record lookup in the IN class, and answered with a zero-TTL
/// record holding the fixed address.
pub fn resolve_fixed(query: &Message) -> Message {
    let mut response = query.make_response();

    for question in &mut response.questions {
        question.qtype = RecordType::A;
        question.qclass = RecordClass::IN;
    }

    let mut answers = Vec::with_capacity(response.questions.len());
    for question in &response.questions {
        answers.push(ResourceRecord {
            name: question.name.clone(),
            rtype: RecordType::A,
            rclass: RecordClass::IN,
            ttl: 0,
            rdata: Bytes::copy_from_slice(&FIXED_ADDRESS.octets()),
        });
    }
    response.answers = answers;

    response
}

/// Relay a query to the upstream nameserver, one question at a time,
/// and aggregate the answers into a single response.
///
/// Returns `None` if any exchange with the upstream fails; there are
/// no partial responses.
async fn resolve_forwarding(upstream: &Mutex<UdpSocket>, query: &Message) -> Option<Message> {
    let mut answers = Vec::with_capacity(query.questions.len());

    for question in &query.questions {
        // a copy of the query header, but with only this question
        let request = Message {
            header: query.header,
            questions: vec![question.clone()],
            answers: Vec::new(),
        };

        match exchange_with_upstream(upstream, &request).await {
            Some(response) if response_matches_request(&request, &response) => {
                answers.append(&mut answers_for_question(question, response));
            }
            Some(_) => {
                tracing::warn!(%question, "mismatched upstream response");
                return None;
            }
            None => {
                tracing::debug!(%question, "no upstream response");
                return None;
            }
        }
    }

    // the response is the query turned around: only the QR flag and
    // the answers change, everything else is echoed
    let mut response = query.clone();
    response.header.is_response = true;
    response.answers = answers;

    Some(response)
}

/// The answers an upstream response contributes to the aggregated
/// reply.  A response with no answers still contributes one record: a
/// placeholder A record with empty RDATA, so the reply keeps one
/// entry per question.
fn answers_for_question(question: &Question, response: Message) -> Vec<ResourceRecord> {
    if response.answers.is_empty() {
        vec![ResourceRecord {
            name: question.name.clone(),
            rtype: RecordType::A,
            rclass: RecordClass::IN,
            ttl: 0,
            rdata: Bytes::new(),
        }]
    } else {
        response.answers
    }
}

/// Very basic validation that an upstream response matches the
/// request: the ID must agree and it must actually be a response.
/// The rcode is not checked: an upstream NXDOMAIN response still gets
/// aggregated, with a placeholder answer.
fn response_matches_request(request: &Message, response: &Message) -> bool {
    if request.header.id != response.header.id {
        return false;
    }
    if !response.header.is_response {
        return false;
    }

    true
}

/// Send a single-question query to the upstream nameserver over the
/// shared socket, and give up after five seconds.  The reply is
/// whatever arrives next on the socket, parsed but not checked
/// against the request: that is the caller's job.
async fn exchange_with_upstream(upstream: &Mutex<UdpSocket>, request: &Message) -> Option<Message> {
    match timeout(
        Duration::from_secs(5),
        exchange_with_upstream_notimeout(upstream, request),
    )
    .await
    {
        Ok(res) => res,
        Err(_) => None,
    }
}

/// Timeout-less version of `exchange_with_upstream`.
async fn exchange_with_upstream_notimeout(
    upstream: &Mutex<UdpSocket>,
    request: &Message,
) -> Option<Message> {
    let mut serialised = match request.to_octets() {
        Ok(serialised) => serialised,
        Err(err) => {
            tracing::error!(?err, "could not serialise request");
            return None;
        }
    };

    let mut buf = vec![0u8; 512];

    // one exchange at a time: the socket is connected, so replies can
    // only be told apart by arrival order
    let sock = upstream.lock().await;
    match send_udp_bytes(&sock, &mut serialised).await {
        Ok(_) => match sock.recv(&mut buf).await {
            // parse only the octets received: the rest of the buffer
            // is not part of the reply
            Ok(size) => match Message::from_octets(&buf[..size]) {
                Ok(response) => Some(response),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}
