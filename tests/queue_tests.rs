use npuzzle::solver::UnremovableQueue;

#[test]
fn dequeues_in_fifo_order() {
    let mut q = UnremovableQueue::new();
    q.enqueue("a", 1);
    q.enqueue("b", 2);
    q.enqueue("c", 3);
    assert_eq!(q.len(), 3);
    assert_eq!(q.dequeue(), ("a", 1));
    assert_eq!(q.dequeue(), ("b", 2));
    assert_eq!(q.len(), 1);
    q.enqueue("d", 4);
    assert_eq!(q.dequeue(), ("c", 3));
    assert_eq!(q.dequeue(), ("d", 4));
    assert!(q.is_empty());
}

#[test]
fn history_survives_dequeue() {
    let mut q = UnremovableQueue::new();
    q.enqueue(10u32, "root");
    q.enqueue(20u32, "child");
    let _ = q.dequeue();
    let _ = q.dequeue();
    assert!(q.is_empty());

    // Membership and indexed access cover everything ever enqueued.
    assert!(q.contains(&10));
    assert!(q.contains(&20));
    let index = q.index_of(&10).unwrap();
    assert_eq!(q.pair(index), &(10, "root"));
    let index = q.index_of(&20).unwrap();
    assert_eq!(q.pair(index), &(20, "child"));
    assert_eq!(q.index_of(&30), None);
}

#[test]
#[should_panic(expected = "duplicate key")]
fn duplicate_enqueue_panics() {
    let mut q = UnremovableQueue::new();
    q.enqueue(1u32, ());
    q.enqueue(1u32, ());
}

#[test]
#[should_panic(expected = "past the end")]
fn dequeue_on_empty_panics() {
    let mut q: UnremovableQueue<u32, ()> = UnremovableQueue::new();
    let _ = q.dequeue();
}
