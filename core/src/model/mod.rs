// forkful/src/model/mod.rs

//! Records exchanged with the gateway and kept in its store.

pub mod contact;
pub mod envelope;
pub mod identity;
pub mod order;
pub mod restaurant;

pub use contact::{ContactMessage, ContactRequest};
pub use identity::{IdentityUser, Session, SessionUser, SignInRequest, SignUpRequest, UserProfile};
pub use order::{DeliveryAddress, NewOrder, Order, OrderLine, OrderStatus, PaymentMethod};
pub use restaurant::{MenuItem, Restaurant};
