//! Based on: https://github.com/tokio-rs/tokio/blob/d74d17307dd53215061c4a8a1f20a0e30461e296/tokio/tests/async_send_sync.rs

#![warn(rust_2018_idioms)]

use std::{any::Any, cell::Cell};
use std::rc::Rc;

use linked_bst::{set, BSTSet, Session};

fn require_send<T: Send>(_t: &T) {}
fn require_sync<T: Sync>(_t: &T) {}

struct NotSend {
    _a: Box<dyn Any + Sync>,
}

struct Invalid;

trait AmbiguousIfSend<A> {
    fn some_item(&self) {}
}
impl<T: ?Sized> AmbiguousIfSend<()> for T {}
impl<T: ?Sized + Send> AmbiguousIfSend<Invalid> for T {}

trait AmbiguousIfSync<A> {
    fn some_item(&self) {}
}
impl<T: ?Sized> AmbiguousIfSync<()> for T {}
impl<T: ?Sized + Sync> AmbiguousIfSync<Invalid> for T {}

macro_rules! assert_value {
    ($type:ty: Send & Sync) => {
        #[allow(unreachable_code)]
        #[allow(unused_variables)]
        pub const _: fn() = || {
            let f: $type = todo!();
            require_send(&f);
            require_sync(&f);
        };
    };
    ($type:ty: !Send & Sync) => {
        #[allow(unreachable_code)]
        #[allow(unused_variables)]
        pub const _: fn() = || {
            let f: $type = todo!();
            AmbiguousIfSend::some_item(&f);
            require_sync(&f);
        };
    };
    ($type:ty: Send & !Sync) => {
        #[allow(unreachable_code)]
        #[allow(unused_variables)]
        pub const _: fn() = || {
            let f: $type = todo!();
            require_send(&f);
            AmbiguousIfSync::some_item(&f);
        };
    };
    ($type:ty: !Send & !Sync) => {
        #[allow(unreachable_code)]
        #[allow(unused_variables)]
        pub const _: fn() = || {
            let f: $type = todo!();
            AmbiguousIfSend::some_item(&f);
            AmbiguousIfSync::some_item(&f);
        };
    };
}

// The set is a plain owner of its keys, so it is exactly as thread-safe as they are
assert_value!(BSTSet<i32>: Send & Sync);
assert_value!(BSTSet<Rc<i32>>: !Send & !Sync);
assert_value!(BSTSet<Cell<i32>>: Send & !Sync);
assert_value!(BSTSet<NotSend>: !Send & Sync);

assert_value!(Session<i32>: Send & Sync);
assert_value!(Session<Rc<i32>>: !Send & !Sync);
assert_value!(Session<Cell<i32>>: Send & !Sync);

// Borrowed handles behave like `&BSTSet<K>`
assert_value!(set::Node<'_, i32>: Send & Sync);
assert_value!(set::Node<'_, Rc<i32>>: !Send & !Sync);
assert_value!(set::Node<'_, Cell<i32>>: !Send & !Sync);
assert_value!(set::Node<'_, NotSend>: Send & Sync);

assert_value!(set::IterPreorder<'_, i32>: Send & Sync);
assert_value!(set::IterPreorder<'_, Rc<i32>>: !Send & !Sync);
assert_value!(set::IterPreorder<'_, Cell<i32>>: !Send & !Sync);
assert_value!(set::IterPreorder<'_, NotSend>: Send & Sync);

assert_value!(set::IterInorder<'_, i32>: Send & Sync);
assert_value!(set::IterInorder<'_, Rc<i32>>: !Send & !Sync);
assert_value!(set::IterInorder<'_, Cell<i32>>: !Send & !Sync);
assert_value!(set::IterInorder<'_, NotSend>: Send & Sync);

assert_value!(set::IterPostorder<'_, i32>: Send & Sync);
assert_value!(set::IterPostorder<'_, Rc<i32>>: !Send & !Sync);
assert_value!(set::IterPostorder<'_, Cell<i32>>: !Send & !Sync);
assert_value!(set::IterPostorder<'_, NotSend>: Send & Sync);

assert_value!(set::Render<'_, i32>: Send & Sync);
assert_value!(set::Render<'_, Cell<i32>>: !Send & !Sync);
