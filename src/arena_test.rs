use crate::arena::Arena;
use crate::{linked, Links};

struct Item {
    links: Links,
    value: u32,
}

linked!(Item, links);

fn item(value: u32) -> Item {
    Item {
        links: Links::new(),
        value,
    }
}

#[test]
fn test_alloc_release() {
    let mut arena: Arena<Item> = Arena::new();
    let a = arena.alloc(item(10));
    let b = arena.alloc(item(20));
    assert_eq!(arena.len(), 2);
    assert_eq!(arena[a].value, 10);
    assert_eq!(arena[b].value, 20);
    assert!(!arena[a].links.is_linked());

    let rec = arena.release(a);
    assert_eq!(rec.value, 10);
    assert_eq!(arena.len(), 1);
    assert!(arena.get(a).is_none());

    // freed slot is recycled.
    let c = arena.alloc(item(30));
    assert_eq!(c, a);
    assert_eq!(arena[c].value, 30);
    assert_eq!(arena.len(), 2);

    arena.clear();
    assert_eq!(arena.len(), 0);
    assert!(arena.get(b).is_none());
}

#[test]
#[should_panic]
fn test_release_stale() {
    let mut arena: Arena<Item> = Arena::with_capacity(4);
    let a = arena.alloc(item(1));
    arena.release(a);
    arena.release(a);
}
