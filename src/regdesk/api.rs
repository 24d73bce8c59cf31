//! # API Facade
//!
//! The desks are a **thin facade** over the command layer and the single entry
//! point for every desk operation, whatever the front end.
//!
//! A desk owns its stores, its reference data and the backends its lists are
//! saved through. Nothing is global: `main` builds one desk and hands it to the
//! terminal loop by `&mut`.
//!
//! The facade:
//! - **Dispatches** to the matching function in `commands/*.rs`
//! - **Supplies context** the commands take explicitly (reference lists, today's date)
//! - **Tracks unsaved changes** so a front end can ask before quitting
//!
//! It never prints and never prompts.
//!
//! ## Generic Over ListBackend
//!
//! - Production: `RegistrationDesk<FsBackend<Registration>>`
//! - Testing: `RegistrationDesk<MemBackend<Registration>>`

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::commands::feasts::{self, CustomerStore, OrderRequest, OrderStore};
use crate::commands::registrations::{self, RegistrationStore};
use crate::commands::{save_list, CmdResult};
use crate::error::Result;
use crate::model::{
    Customer, CustomerField, FeastMenu, FeastOrder, Mountain, OrderField, Registration,
    RegistrationField,
};
use crate::persist::ListBackend;
use crate::store::{RecordStore, Removed, StoreOrder};
use crate::views;

/// Unsaved-change state of a desk.
///
/// A delete remembers the state before it, so undoing that delete right away
/// returns the desk to it. Any other change forgets it.
#[derive(Debug, Default)]
struct Changes {
    dirty: bool,
    before_delete: Option<bool>,
}

impl Changes {
    fn track(&mut self, result: Result<CmdResult>) -> Result<CmdResult> {
        if went_through(&result) {
            self.dirty = true;
            self.before_delete = None;
        }
        result
    }

    fn track_delete(&mut self, result: Result<CmdResult>) -> Result<CmdResult> {
        if went_through(&result) {
            self.before_delete = Some(self.dirty);
            self.dirty = true;
        }
        result
    }

    fn track_restore(&mut self, result: Result<CmdResult>) -> Result<CmdResult> {
        if went_through(&result) {
            self.dirty = self.before_delete.take().unwrap_or(true);
        }
        result
    }

    fn saved(&mut self) {
        self.dirty = false;
        self.before_delete = None;
    }
}

fn went_through(result: &Result<CmdResult>) -> bool {
    matches!(result, Ok(r) if !r.has_errors())
}

/// Student registrations for mountain trips.
pub struct RegistrationDesk<B: ListBackend<Registration>> {
    store: RegistrationStore,
    mountains: Vec<Mountain>,
    backend: B,
    changes: Changes,
}

impl<B: ListBackend<Registration>> RegistrationDesk<B> {
    /// Loads the stored registrations through `backend`.
    pub fn open(backend: B, mountains: Vec<Mountain>) -> Self {
        let store = RecordStore::from_records(backend.load(), StoreOrder::ByKey);
        info!(
            registrations = store.len(),
            mountains = mountains.len(),
            from = %backend.location(),
            "registration desk opened"
        );
        Self {
            store,
            mountains,
            backend,
            changes: Changes::default(),
        }
    }

    pub fn registrations(&self) -> &RegistrationStore {
        &self.store
    }

    pub fn mountains(&self) -> &[Mountain] {
        &self.mountains
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.changes.dirty
    }

    pub fn add(&mut self, registration: Registration) -> Result<CmdResult> {
        let result = registrations::add(&mut self.store, &self.mountains, registration);
        self.changes.track(result)
    }

    pub fn view(&self, student_id: &str) -> Result<CmdResult> {
        registrations::view(&self.store, student_id)
    }

    pub fn update(
        &mut self,
        student_id: &str,
        field: RegistrationField,
        value: &str,
    ) -> Result<CmdResult> {
        let result = registrations::update(&mut self.store, &self.mountains, student_id, field, value);
        self.changes.track(result)
    }

    pub fn list(&self) -> Result<CmdResult> {
        registrations::list(&self.store)
    }

    pub fn delete(&mut self, student_id: &str) -> Result<CmdResult> {
        let result = registrations::delete(&mut self.store, student_id);
        self.changes.track_delete(result)
    }

    pub fn restore(&mut self, removed: Removed<Registration>) -> Result<CmdResult> {
        let result = registrations::restore(&mut self.store, removed);
        self.changes.track_restore(result)
    }

    pub fn search_by_name(&self, name: &str) -> Result<CmdResult> {
        registrations::search_by_name(&self.store, name)
    }

    pub fn search_by_campus(&self, campus: &str) -> Result<CmdResult> {
        registrations::search_by_campus(&self.store, campus)
    }

    pub fn statistics(&self) -> Result<CmdResult> {
        registrations::statistics(&self.store, &self.mountains)
    }

    pub fn mountain_list(&self) -> String {
        views::mountain_list(&self.mountains)
    }

    pub fn save(&mut self) -> Result<CmdResult> {
        let result = save_list(&self.backend, &self.store, "registrations")?;
        if !result.has_errors() {
            self.changes.saved();
        }
        Ok(result)
    }
}

/// Customers and their feast orders.
pub struct FeastDesk<CB, OB>
where
    CB: ListBackend<Customer>,
    OB: ListBackend<FeastOrder>,
{
    customers: CustomerStore,
    orders: OrderStore,
    menus: Vec<FeastMenu>,
    customer_backend: CB,
    order_backend: OB,
    today: Option<NaiveDate>,
    changes: Changes,
}

impl<CB, OB> FeastDesk<CB, OB>
where
    CB: ListBackend<Customer>,
    OB: ListBackend<FeastOrder>,
{
    pub fn open(customer_backend: CB, order_backend: OB, menus: Vec<FeastMenu>) -> Self {
        let customers = RecordStore::from_records(customer_backend.load(), StoreOrder::Insertion);
        let orders = RecordStore::from_records(order_backend.load(), StoreOrder::Insertion);
        info!(
            customers = customers.len(),
            orders = orders.len(),
            menus = menus.len(),
            "feast desk opened"
        );
        Self {
            customers,
            orders,
            menus,
            customer_backend,
            order_backend,
            today: None,
            changes: Changes::default(),
        }
    }

    /// Pins the date used for expiry and future-date checks.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn customers(&self) -> &CustomerStore {
        &self.customers
    }

    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    pub fn menus(&self) -> &[FeastMenu] {
        &self.menus
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.changes.dirty
    }

    // --- Customers ---

    pub fn register_customer(&mut self, customer: Customer) -> Result<CmdResult> {
        let result = feasts::register_customer(&mut self.customers, customer);
        self.changes.track(result)
    }

    pub fn view_customer(&self, code: &str) -> Result<CmdResult> {
        feasts::view_customer(&self.customers, code)
    }

    pub fn update_customer(
        &mut self,
        code: &str,
        field: CustomerField,
        value: &str,
    ) -> Result<CmdResult> {
        let result = feasts::update_customer(&mut self.customers, code, field, value);
        self.changes.track(result)
    }

    pub fn search_customers_by_name(&self, query: &str) -> Result<CmdResult> {
        feasts::search_customers_by_name(&self.customers, query)
    }

    pub fn search_customer_by_phone(&self, phone: &str) -> Result<CmdResult> {
        feasts::search_customer_by_phone(&self.customers, phone)
    }

    pub fn list_customers(&self) -> Result<CmdResult> {
        feasts::list_customers(&self.customers)
    }

    pub fn delete_customer(&mut self, code: &str) -> Result<CmdResult> {
        let result = feasts::delete_customer(&mut self.customers, &self.orders, code);
        self.changes.track_delete(result)
    }

    pub fn restore_customer(&mut self, removed: Removed<Customer>) -> Result<CmdResult> {
        let result = feasts::restore_customer(&mut self.customers, removed);
        self.changes.track_restore(result)
    }

    // --- Menus and orders ---

    pub fn list_menus(&self) -> Result<CmdResult> {
        feasts::list_menus(&self.menus)
    }

    pub fn next_order_id(&self) -> u32 {
        feasts::next_order_id(&self.orders)
    }

    pub fn place_order(&mut self, request: OrderRequest) -> Result<CmdResult> {
        let today = self.today();
        let result = feasts::place_order(&mut self.orders, &self.customers, &self.menus, request, today);
        self.changes.track(result)
    }

    pub fn view_order(&self, id: u32) -> Result<CmdResult> {
        feasts::view_order(&self.orders, &self.customers, &self.menus, id)
    }

    pub fn update_order(&mut self, id: u32, field: OrderField, value: &str) -> Result<CmdResult> {
        let today = self.today();
        let result = feasts::update_order(&mut self.orders, &self.menus, id, field, value, today);
        self.changes.track(result)
    }

    pub fn list_orders(&self) -> Result<CmdResult> {
        feasts::list_orders(&self.orders, &self.menus)
    }

    pub fn delete_order(&mut self, id: u32) -> Result<CmdResult> {
        let result = feasts::delete_order(&mut self.orders, &self.customers, &self.menus, id);
        self.changes.track_delete(result)
    }

    pub fn restore_order(&mut self, removed: Removed<FeastOrder>) -> Result<CmdResult> {
        let result = feasts::restore_order(&mut self.orders, removed);
        self.changes.track_restore(result)
    }

    /// Saves customers and orders. Each list is written independently; one
    /// failing does not stop the other.
    pub fn save(&mut self) -> Result<CmdResult> {
        let mut result = save_list(&self.customer_backend, &self.customers, "customers")?;
        let orders = save_list(&self.order_backend, &self.orders, "feast orders")?;
        result.messages.extend(orders.messages);
        if !result.has_errors() {
            self.changes.saved();
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Affected;
    use crate::persist::MemBackend;

    fn mountains() -> Vec<Mountain> {
        vec![Mountain {
            code: "1".to_string(),
            name: "Fansipan".to_string(),
            province: "Lao Cai".to_string(),
            description: None,
        }]
    }

    fn menus() -> Vec<FeastMenu> {
        vec![FeastMenu {
            code: "PW001".to_string(),
            name: "Wedding party".to_string(),
            price: 1_000_000.0,
            ingredients: vec![],
        }]
    }

    fn registration_desk() -> RegistrationDesk<MemBackend<Registration>> {
        RegistrationDesk::open(MemBackend::new(), mountains())
    }

    fn feast_desk() -> FeastDesk<MemBackend<Customer>, MemBackend<FeastOrder>> {
        FeastDesk::open(MemBackend::new(), MemBackend::new(), menus())
            .with_today(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap())
    }

    fn an() -> Registration {
        Registration::new("SE000001", "An Nguyen", "an@fpt.edu.vn", "0321234567", "1")
    }

    #[test]
    fn open_loads_backend_records_sorted() {
        let backend = MemBackend::with_records(vec![
            Registration::new("SE000009", "Binh Tran", "b@fpt.edu.vn", "0201234567", "1"),
            an(),
        ]);
        let desk = RegistrationDesk::open(backend, mountains());
        let ids: Vec<_> = desk
            .registrations()
            .records()
            .iter()
            .map(|r| r.student_id().to_string())
            .collect();
        assert_eq!(ids, vec!["SE000001", "SE000009"]);
        assert!(!desk.has_unsaved_changes());
    }

    #[test]
    fn add_marks_dirty_and_save_clears() {
        let mut desk = registration_desk();
        desk.add(an()).unwrap();
        assert!(desk.has_unsaved_changes());

        let result = desk.save().unwrap();
        assert!(!result.has_errors());
        assert!(!desk.has_unsaved_changes());
        assert_eq!(desk.backend.stored().len(), 1);
    }

    #[test]
    fn rejected_add_leaves_desk_clean() {
        let mut desk = registration_desk();
        let result = desk
            .add(Registration::new("SE000001", "An Nguyen", "an@fpt.edu.vn", "0321234567", "9"))
            .unwrap();
        assert!(result.has_errors());
        assert!(!desk.has_unsaved_changes());
    }

    #[test]
    fn failed_save_keeps_desk_dirty() {
        let mut desk = registration_desk();
        desk.add(an()).unwrap();
        desk.backend.set_simulate_write_error(true);
        let result = desk.save().unwrap();
        assert!(result.has_errors());
        assert!(desk.has_unsaved_changes());
    }

    #[test]
    fn delete_and_restore_dispatch() {
        let mut desk = registration_desk();
        desk.add(an()).unwrap();
        let mut result = desk.delete("SE000001").unwrap();
        assert!(desk.registrations().is_empty());
        let Some(Affected::Registration(reg)) = result.affected.pop() else {
            panic!("expected removed registration");
        };
        desk.restore(reg).unwrap();
        assert_eq!(desk.registrations().len(), 1);
    }

    #[test]
    fn undone_delete_after_save_leaves_desk_clean() {
        let mut desk = registration_desk();
        desk.add(an()).unwrap();
        desk.save().unwrap();

        let mut result = desk.delete("SE000001").unwrap();
        assert!(desk.has_unsaved_changes());
        let Some(Affected::Registration(reg)) = result.affected.pop() else {
            panic!("expected removed registration");
        };
        desk.restore(reg).unwrap();
        assert!(!desk.has_unsaved_changes());
    }

    #[test]
    fn undone_delete_keeps_earlier_changes_unsaved() {
        let mut desk = registration_desk();
        desk.add(an()).unwrap();

        let mut result = desk.delete("SE000001").unwrap();
        let Some(Affected::Registration(reg)) = result.affected.pop() else {
            panic!("expected removed registration");
        };
        desk.restore(reg).unwrap();
        assert!(desk.has_unsaved_changes());
    }

    #[test]
    fn feast_undo_after_save_leaves_desk_clean() {
        let mut desk = feast_desk();
        desk.register_customer(Customer::new("C0001", "Nguyen An", "an@x.vn", "0912345678"))
            .unwrap();
        desk.place_order(OrderRequest {
            customer_code: "C0001".to_string(),
            menu_code: "PW001".to_string(),
            event_date: "02/06/2026".to_string(),
            tables: 1,
        })
        .unwrap();
        desk.save().unwrap();

        let mut result = desk.delete_order(1).unwrap();
        let Some(Affected::Order(order)) = result.affected.pop() else {
            panic!("expected removed order");
        };
        desk.restore_order(order).unwrap();
        assert!(!desk.has_unsaved_changes());

        let mut result = desk.delete_customer("C0001").unwrap();
        let Some(Affected::Customer(customer)) = result.affected.pop() else {
            panic!("expected removed customer");
        };
        desk.restore_customer(customer).unwrap();
        assert!(!desk.has_unsaved_changes());
    }

    #[test]
    fn feast_desk_uses_pinned_today() {
        let mut desk = feast_desk();
        desk.register_customer(Customer::new("C0001", "Nguyen An", "an@x.vn", "0912345678"))
            .unwrap();
        let past = desk
            .place_order(OrderRequest {
                customer_code: "C0001".to_string(),
                menu_code: "PW001".to_string(),
                event_date: "31/05/2026".to_string(),
                tables: 2,
            })
            .unwrap();
        assert!(past.has_errors());

        let ok = desk
            .place_order(OrderRequest {
                customer_code: "C0001".to_string(),
                menu_code: "PW001".to_string(),
                event_date: "02/06/2026".to_string(),
                tables: 2,
            })
            .unwrap();
        assert!(!ok.has_errors());
        assert_eq!(desk.next_order_id(), 2);
    }

    #[test]
    fn feast_save_writes_both_lists() {
        let mut desk = feast_desk();
        desk.register_customer(Customer::new("C0001", "Nguyen An", "an@x.vn", "0912345678"))
            .unwrap();
        desk.place_order(OrderRequest {
            customer_code: "C0001".to_string(),
            menu_code: "PW001".to_string(),
            event_date: "02/06/2026".to_string(),
            tables: 1,
        })
        .unwrap();

        let result = desk.save().unwrap();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(desk.customer_backend.stored().len(), 1);
        assert_eq!(desk.order_backend.stored().len(), 1);
    }

    #[test]
    fn feast_save_reports_partial_failure() {
        let mut desk = feast_desk();
        desk.register_customer(Customer::new("C0001", "Nguyen An", "an@x.vn", "0912345678"))
            .unwrap();
        desk.order_backend.set_simulate_write_error(true);

        let result = desk.save().unwrap();
        assert!(result.has_errors());
        assert_eq!(desk.customer_backend.stored().len(), 1);
        assert!(desk.has_unsaved_changes());
    }
}
