use crate::wire::{EndpointAddr, HEADER_LEN, Packet, WireError, decode, encode};

fn roundtrip(pkt: &Packet) -> Packet {
    decode(&encode(pkt)).expect("decode encoded frame")
}

#[test]
fn codec_roundtrips_every_control_shape() {
    for pkt in [
        Packet::syn(),
        Packet::syn_ack(0),
        Packet::handshake_ack(0),
        Packet::fin(),
        Packet::fin_ack(0),
        Packet::teardown_ack(0),
        Packet::data_ack(42),
    ] {
        assert_eq!(roundtrip(&pkt), pkt);
    }
}

#[test]
fn codec_roundtrips_data_segments() {
    let pkt = Packet::data(7, b"ABCD".to_vec());
    assert_eq!(roundtrip(&pkt), pkt);

    let big = Packet::data(u64::MAX, vec![0xAB; 1500]);
    assert_eq!(roundtrip(&big), big);
}

#[test]
fn codec_distinguishes_missing_payload_from_empty_payload() {
    let empty = Packet::data(1, Vec::new());
    let decoded = roundtrip(&empty);
    assert_eq!(decoded.payload, Some(Vec::new()));

    let none = Packet::data_ack(1);
    assert_eq!(roundtrip(&none).payload, None);
}

#[test]
fn decode_rejects_truncated_frames() {
    assert_eq!(
        decode(&[]),
        Err(WireError::Truncated {
            need: HEADER_LEN,
            got: 0
        })
    );
    let frame = encode(&Packet::syn());
    assert_eq!(
        decode(&frame[..HEADER_LEN - 1]),
        Err(WireError::Truncated {
            need: HEADER_LEN,
            got: HEADER_LEN - 1
        })
    );
}

#[test]
fn decode_rejects_unknown_addresses() {
    let mut frame = encode(&Packet::syn());
    frame[0] = 9;
    assert_eq!(decode(&frame), Err(WireError::BadAddr(9)));

    let mut frame = encode(&Packet::syn());
    frame[1] = 0xFF;
    assert_eq!(decode(&frame), Err(WireError::BadAddr(0xFF)));
}

#[test]
fn decode_rejects_unknown_flag_bits() {
    let mut frame = encode(&Packet::syn());
    frame[2] |= 1 << 7;
    assert!(matches!(decode(&frame), Err(WireError::BadFlags(_))));
}

#[test]
fn decode_rejects_payload_length_mismatch() {
    // 数据帧被截断：头部声称 4 字节载荷，帧里只剩 2 字节
    let frame = encode(&Packet::data(1, b"ABCD".to_vec()));
    assert_eq!(
        decode(&frame[..frame.len() - 2]),
        Err(WireError::PayloadLength { expect: 4, got: 2 })
    );

    // 控制帧却声称有载荷长度
    let mut frame = encode(&Packet::data_ack(1));
    frame[22] = 1;
    assert!(matches!(
        decode(&frame),
        Err(WireError::PayloadLength { .. })
    ));
}

#[test]
fn packet_predicates_match_their_shapes() {
    assert!(Packet::syn().is_pure_syn());
    assert!(!Packet::syn().is_syn_ack());

    assert!(Packet::syn_ack(0).is_syn_ack());
    assert!(!Packet::syn_ack(0).is_pure_syn());
    assert!(!Packet::syn_ack(0).is_pure_ack());

    assert!(Packet::handshake_ack(0).is_pure_ack());
    assert!(Packet::teardown_ack(0).is_pure_ack());
    assert!(Packet::data_ack(3).is_pure_ack());

    assert!(Packet::fin().is_fin_ack());
    assert!(Packet::fin_ack(0).is_fin_ack());

    let data = Packet::data(1, b"x".to_vec());
    assert!(data.is_data());
    assert!(!data.is_pure_ack());
}

#[test]
fn handshake_and_teardown_replies_ack_peer_seq_plus_one() {
    assert_eq!(Packet::syn_ack(0).ack, 1);
    assert_eq!(Packet::handshake_ack(0).ack, 1);
    assert_eq!(Packet::fin_ack(0).ack, 1);
    assert_eq!(Packet::teardown_ack(0).ack, 1);
    // 数据 ACK 精确回显序号
    assert_eq!(Packet::data_ack(5).ack, 5);
}

#[test]
fn endpoint_addr_peer_is_involution() {
    assert_eq!(EndpointAddr::A.peer(), EndpointAddr::B);
    assert_eq!(EndpointAddr::B.peer(), EndpointAddr::A);
    assert_eq!(EndpointAddr::A.peer().peer(), EndpointAddr::A);
}
