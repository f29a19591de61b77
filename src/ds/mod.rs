pub mod doubly_linked_list;
pub mod linked_list;
pub mod linked_map;
pub mod list;
pub mod multi_map;
pub mod node;
pub mod slot_arena;
pub mod stack;

pub use doubly_linked_list::DoublyLinkedList;
pub use linked_list::{LinkKind, LinkedList};
pub use linked_map::LinkedMap;
pub use list::List;
pub use multi_map::{MultiMap, SetMultiMap};
pub use node::{KeyedNode, Linked, Links, Node};
pub use slot_arena::{SlotArena, SlotId};
pub use stack::Stack;
