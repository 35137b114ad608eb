//! Runs every [Unique] operation in sequence and asserts the resulting state.
//!
//! Exits with status 0 when all checks pass; a failed check panics.

use log::{debug, info};
use spin::Mutex;
use unique::{Pool, PoolError, Pooled, Unique};

mod logging;

/// Values of every released [TestClass], in release order.
static RELEASED: Mutex<Vec<i32>> = Mutex::new(Vec::new());

struct TestClass {
    value: i32,
}

impl TestClass {
    fn new(value: i32) -> Self {
        debug!("TestClass({}) acquired", value);
        TestClass { value }
    }
}

impl Drop for TestClass {
    fn drop(&mut self) {
        debug!("TestClass({}) released", self.value);
        RELEASED.lock().push(self.value);
    }
}

fn released() -> Vec<i32> {
    RELEASED.lock().clone()
}

fn check_handle() {
    info!("Default constructor");
    let ptr1: Unique<TestClass> = Unique::new();
    assert!(!ptr1.is_present());
    assert!(ptr1.get().is_none());

    info!("Construct with a value");
    let mut ptr2 = Unique::from_value(TestClass::new(42));
    assert!(ptr2.is_present());
    assert_eq!(ptr2.value, 42);

    info!("Move constructor");
    let mut ptr3 = ptr2.take();
    assert!(!ptr2.is_present());
    assert!(ptr3.is_present());
    assert_eq!(ptr3.value, 42);

    info!("Move assignment");
    let mut ptr4: Unique<TestClass> = Unique::new();
    ptr4.assign(&mut ptr3);
    assert!(!ptr3.is_present());
    assert!(ptr4.is_present());
    assert_eq!(ptr4.value, 42);

    info!("Release ownership");
    let raw = ptr4.release().expect("ptr4 owns a value");
    assert!(!ptr4.is_present());
    assert_eq!(unsafe { raw.as_ref() }.value, 42);
    assert!(released().is_empty());
    drop(unsafe { Box::from_raw(raw.as_ptr()) });

    info!("Reset with a new value");
    let mut ptr5 = Unique::from_value(TestClass::new(10));
    assert_eq!(ptr5.value, 10);
    ptr5.reset_box(Box::new(TestClass::new(20)));
    assert_eq!(ptr5.value, 20);
    assert_eq!(released(), [42, 10]);
    ptr5.reset();
    assert!(!ptr5.is_present());
    assert_eq!(released(), [42, 10, 20]);

    info!("Reset, then drop");
    ptr5.reset_box(Box::new(TestClass::new(30)));
    assert_eq!(ptr5.value, 30);
    assert!(ptr5.is_present());
    ptr5.reset();
    assert!(!ptr5.is_present());
    ptr5.reset();
    assert_eq!(released(), [42, 10, 20, 30]);
}

fn check_pool() {
    info!("Pooled handles");
    let pool = Pool::new(2);
    let mut a = pool.alloc(TestClass::new(1)).expect("free slot");
    let b = pool.alloc(TestClass::new(2)).expect("free slot");
    match pool.alloc(TestClass::new(3)) {
        Err(err @ PoolError::Exhausted { .. }) => info!("{}", err),
        Ok(_) => panic!("a full pool handed out a slot"),
    }

    let mut c: Pooled<'_, TestClass> = Unique::empty_with(pool.deleter());
    c.assign(&mut a);
    assert!(!a.is_present());
    assert_eq!(pool.live(), 2);
    drop(b);
    c.reset();
    assert_eq!(pool.live(), 0);
    debug!("{:?}", pool);
}

fn main() {
    logging::init();
    check_handle();
    RELEASED.lock().clear();
    check_pool();
    assert_eq!(released(), [3, 2, 1]);
    info!("All checks passed!");
}
