use field_logger::{Buffer, Pool};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_get_on_empty_pool_allocates() {
    let pool: Pool<Buffer> = Pool::new();
    assert_eq!(pool.idle(), 0);
    let buf = pool.get();
    assert!(buf.is_empty());
    assert_eq!(pool.idle(), 0);
}

#[test]
fn test_put_resets_and_keeps_capacity() {
    let pool: Pool<Buffer> = Pool::new();
    let mut buf = pool.get();
    buf.append_str("leftover content from a previous record");
    let cap = buf.cap();
    pool.put(buf);
    assert_eq!(pool.idle(), 1);

    let buf = pool.get();
    assert!(buf.is_empty(), "Pooled buffers must come back empty");
    assert_eq!(buf.cap(), cap, "Pooled buffers should keep their allocation");
    assert_eq!(pool.idle(), 0);
}

#[test]
fn test_guard_returns_on_every_path() {
    fn fails(pool: &Pool<Buffer>) -> Result<(), &'static str> {
        let mut buf = pool.guard();
        buf.append_str("partial");
        if !buf.is_empty() {
            return Err("early return");
        }
        Ok(())
    }

    let pool: Pool<Buffer> = Pool::new();
    assert!(fails(&pool).is_err());
    assert_eq!(pool.idle(), 1, "Guard should return the buffer on early exit");
    assert!(pool.get().is_empty());
}

#[test]
fn test_field_lists_are_recycled() {
    let pool: Pool<Vec<field_logger::Field>> = Pool::new();
    {
        let mut fields = pool.guard();
        fields.push(field_logger::Field::bool("ok", true));
    }
    assert!(pool.get().is_empty());
}

#[test]
fn test_concurrent_borrowers_never_share() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 200;

    let pool: Arc<Pool<Buffer>> = Arc::new(Pool::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|id| {
            let pool = pool.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for round in 0..ROUNDS {
                    let mut buf = pool.guard();
                    assert!(buf.is_empty(), "Borrowed buffer was not empty");
                    let tag = format!("{id}:{round}");
                    buf.append_str(&tag);
                    thread::yield_now();
                    assert_eq!(
                        buf.to_string_lossy(),
                        tag,
                        "Another thread wrote into a borrowed buffer"
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(pool.idle() <= THREADS);
    let mut seen = HashSet::new();
    let mut drained = Vec::new();
    while pool.idle() > 0 {
        let buf = pool.get();
        assert!(seen.insert(buf.as_bytes().as_ptr() as usize) || buf.cap() == 0);
        drained.push(buf);
    }
}
