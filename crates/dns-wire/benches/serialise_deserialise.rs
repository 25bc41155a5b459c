use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::net::Ipv4Addr;

use bytes::Bytes;
use dns_wire::protocol::types::*;

#[allow(non_snake_case)]
fn bench__question(c: &mut Criterion) {
    let message = query_message(
        1234,
        Question {
            name: domain("www.example.com."),
            qtype: RecordType::A,
            qclass: RecordClass::IN,
        },
    );

    roundtrip(c, "question", &message);
}

#[allow(non_snake_case)]
fn bench__answer__small(c: &mut Criterion) {
    let mut message = query_message(
        1234,
        Question {
            name: domain("www.example.com."),
            qtype: RecordType::A,
            qclass: RecordClass::IN,
        },
    )
    .make_response();

    message.answers = vec![a_record("www.example.com.", Ipv4Addr::new(1, 1, 1, 1))];

    roundtrip(c, "answer/small", &message);
}

#[allow(non_snake_case)]
fn bench__answer__big(c: &mut Criterion) {
    let mut message = query_message(
        1234,
        Question {
            name: domain("www.example.com."),
            qtype: RecordType::A,
            qclass: RecordClass::IN,
        },
    )
    .make_response();

    for i in 0..128 {
        let name = format!("host-{:?}.example.com.", i);
        message.answers.push(a_record(&name, Ipv4Addr::new(1, 1, 1, 1)));
        message.answers.push(txt_record(
            &name,
            b"a moderately sized piece of uninterpreted rdata",
        ));
    }

    roundtrip(c, "answer/big", &message);
}

/// Times `to_octets` and `from_octets` of the given message, as
/// `serialise/{name}` and `deserialise/{name}`.
fn roundtrip(c: &mut Criterion, name: &str, message: &Message) {
    c.bench_function(&format!("serialise/{name}"), |b| {
        b.iter_batched(
            || message.clone(),
            |message| message.to_octets(),
            BatchSize::SmallInput,
        )
    });

    let serialised = message.to_octets().unwrap();
    c.bench_function(&format!("deserialise/{name}"), |b| {
        b.iter(|| Message::from_octets(black_box(&serialised)))
    });
}

// TODO: reduce duplication with protocol::types::test_util
fn domain(name: &str) -> DomainName {
    DomainName::from_dotted_string(name).unwrap()
}

fn query_message(id: u16, question: Question) -> Message {
    Message {
        header: Header {
            id,
            is_response: false,
            opcode: Opcode::Standard,
            is_authoritative: false,
            is_truncated: false,
            recursion_desired: true,
            recursion_available: false,
            z: 0,
            rcode: Rcode::NoError,
        },
        questions: vec![question],
        answers: Vec::new(),
    }
}

fn a_record(name: &str, address: Ipv4Addr) -> ResourceRecord {
    ResourceRecord {
        name: domain(name),
        rtype: RecordType::A,
        rclass: RecordClass::IN,
        ttl: 300,
        rdata: Bytes::copy_from_slice(&address.octets()),
    }
}

fn txt_record(name: &str, text: &'static [u8]) -> ResourceRecord {
    ResourceRecord {
        name: domain(name),
        rtype: RecordType::TXT,
        rclass: RecordClass::IN,
        ttl: 300,
        rdata: Bytes::from_static(text),
    }
}

criterion_group!(
    benches,
    bench__question,
    bench__answer__small,
    bench__answer__big,
);
criterion_main!(benches);
