//! Database Models

// Serde helpers
pub mod serde_helpers;

// Catalog
pub mod category;
pub mod menu;
pub mod product;

// Location
pub mod dining_table;

// People
pub mod attendance;
pub mod staff;
pub mod user;

// Bookings and orders
pub mod order;
pub mod reservation;

// Re-exports
pub use attendance::{Attendance, AttendanceMark, AttendanceWithStaff};
pub use category::{Category, CategoryCreate, CategoryStatus, CategoryUpdate};
pub use dining_table::{
    DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus, TableView,
};
pub use menu::{Menu, MenuCreate, MenuUpdate};
pub use order::{
    Customer, Order, OrderCreate, OrderItem, OrderItemCreate, OrderPay, OrderStatus,
    OrderStatusUpdate, OrderWithTable, PaymentMethod, ProductSnapshot,
};
pub use product::{MenuSummary, Product, ProductCreate, ProductUpdate, ProductWithMenu};
pub use reservation::{
    Reservation, ReservationCreate, ReservationCustomer, ReservationPayment,
    ReservationPaymentMethod, ReservationStatus, ReservationUpdate, ReservationWithTable,
};
pub use staff::{Staff, StaffCreate, StaffUpdate};
pub use user::{User, UserRole, UserView};
