use crate::proto::{Accepted, ReassemblyBuffer};

#[test]
fn in_order_segments_drain_immediately() {
    let mut buf = ReassemblyBuffer::new();
    assert_eq!(buf.expected_seq(), 1);

    assert_eq!(buf.accept(1, b"ABCD".to_vec()), Accepted::Buffered);
    let ready = buf.drain();
    assert_eq!(ready, vec![(1, b"ABCD".to_vec())]);
    assert_eq!(buf.expected_seq(), 2);

    assert_eq!(buf.accept(2, b"EFGH".to_vec()), Accepted::Buffered);
    assert_eq!(buf.drain(), vec![(2, b"EFGH".to_vec())]);
    assert_eq!(buf.expected_seq(), 3);
    assert_eq!(buf.pending_len(), 0);
}

#[test]
fn out_of_order_segments_wait_for_the_gap() {
    let mut buf = ReassemblyBuffer::new();

    // seq 2、3 先到：缺口在 1，什么都不交付
    assert_eq!(buf.accept(2, b"EFGH".to_vec()), Accepted::Buffered);
    assert_eq!(buf.accept(3, b"IJKL".to_vec()), Accepted::Buffered);
    assert!(buf.drain().is_empty());
    assert_eq!(buf.expected_seq(), 1);
    assert_eq!(buf.pending_len(), 2);

    // 缺口补齐：一次按序排空
    assert_eq!(buf.accept(1, b"ABCD".to_vec()), Accepted::Buffered);
    let ready = buf.drain();
    assert_eq!(
        ready,
        vec![
            (1, b"ABCD".to_vec()),
            (2, b"EFGH".to_vec()),
            (3, b"IJKL".to_vec()),
        ]
    );
    assert_eq!(buf.expected_seq(), 4);
    assert_eq!(buf.pending_len(), 0);
}

#[test]
fn duplicates_are_not_stored_twice() {
    let mut buf = ReassemblyBuffer::new();

    assert_eq!(buf.accept(2, b"first".to_vec()), Accepted::Buffered);
    // 缓冲中已有 seq 2：后到的副本被拒，原载荷保留
    assert_eq!(buf.accept(2, b"second".to_vec()), Accepted::Duplicate);
    assert_eq!(buf.pending_len(), 1);

    assert_eq!(buf.accept(1, b"gap".to_vec()), Accepted::Buffered);
    let ready = buf.drain();
    assert_eq!(ready[1], (2, b"first".to_vec()));
}

#[test]
fn already_delivered_segments_are_rejected_without_storage() {
    let mut buf = ReassemblyBuffer::new();

    assert_eq!(buf.accept(1, b"ABCD".to_vec()), Accepted::Buffered);
    buf.drain();
    assert_eq!(buf.expected_seq(), 2);

    // 迟到的重传副本：早于 expected_seq，不存、不交付
    assert_eq!(buf.accept(1, b"ABCD".to_vec()), Accepted::AlreadyDelivered);
    assert_eq!(buf.pending_len(), 0);
    assert!(buf.drain().is_empty());
}
