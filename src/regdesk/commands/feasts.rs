//! Feast desk commands: customers, menus and feast orders.
//!
//! Orders reference a customer and a menu by code; both must exist when the
//! order is placed. An order whose event date has passed is read-only.
//! Commands that depend on the current date take `today` explicitly.

use chrono::NaiveDate;

use super::{rejected, Affected, CmdMessage, CmdResult};
use crate::error::{RegdeskError, Result};
use crate::model::{Customer, CustomerField, FeastMenu, FeastOrder, OrderField, CUSTOMER_NAME_LEN};
use crate::store::{RecordStore, Removed};
use crate::validation::{self, Pattern};
use crate::views;

pub type CustomerStore = RecordStore<Customer>;
pub type OrderStore = RecordStore<FeastOrder>;

fn require_customer(customers: &CustomerStore, code: &str) -> Result<()> {
    if customers.contains(&code.to_string()) {
        Ok(())
    } else {
        Err(RegdeskError::Reference {
            kind: "customer",
            code: code.to_string(),
        })
    }
}

fn require_menu(menus: &[FeastMenu], code: &str) -> Result<()> {
    if menus.iter().any(|m| m.code == code) {
        Ok(())
    } else {
        Err(RegdeskError::Reference {
            kind: "feast menu",
            code: code.to_string(),
        })
    }
}

fn require_not_expired(order: &FeastOrder, today: NaiveDate) -> Result<()> {
    match order.event_day() {
        Some(day) if day < today => Err(RegdeskError::Expired(format!(
            "The event date [{}] of order [#{}] is expired!",
            order.event_date(),
            order.id()
        ))),
        Some(_) => Ok(()),
        None => Err(RegdeskError::Store(format!(
            "The stored date [{}] of order [#{}] is invalid",
            order.event_date(),
            order.id()
        ))),
    }
}

fn check_customer(customer: &Customer) -> Result<()> {
    let (min, max) = CUSTOMER_NAME_LEN;
    validation::validate("customer code", customer.code(), Pattern::CustomerCode)?;
    validation::validate_name("customer name", customer.name(), min, max)?;
    validation::validate("email", customer.email(), Pattern::Email)?;
    validation::validate("phone number", customer.phone(), Pattern::CustomerPhone)?;
    Ok(())
}

// --- Customers ---

pub fn register_customer(customers: &mut CustomerStore, customer: Customer) -> Result<CmdResult> {
    let action = format!("create customer with code [{}]", customer.code());
    match check_customer(&customer).and_then(|_| customers.create(customer)) {
        Ok(c) => Ok(CmdResult::default()
            .with_view(views::customer_card(c))
            .with_message(CmdMessage::success(format!(
                "Create customer with code [{}] successfully!",
                c.code()
            )))),
        Err(e) => rejected(action, e),
    }
}

pub fn view_customer(customers: &CustomerStore, code: &str) -> Result<CmdResult> {
    match customers.retrieve(&code.to_string()) {
        Ok(c) => Ok(CmdResult::default().with_view(views::customer_card(c))),
        Err(e) => rejected("find customer", e),
    }
}

pub fn update_customer(
    customers: &mut CustomerStore,
    code: &str,
    field: CustomerField,
    value: &str,
) -> Result<CmdResult> {
    let key = code.to_string();
    match customers.update(&key, field, value) {
        Ok(_) => {
            let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
                "Update [{}] of customer with code [{}] successfully!",
                field, code
            )));
            if let Ok(c) = customers.retrieve(&key) {
                result.add_view(views::customer_card(c));
            }
            Ok(result)
        }
        Err(e) => rejected(format!("update {} of customer [{}]", field, code), e),
    }
}

/// A query with a space matches anywhere in the full name; a single word
/// matches within the first name only. Results are ordered by first name.
pub fn search_customers_by_name(customers: &CustomerStore, query: &str) -> Result<CmdResult> {
    let query = query.trim();
    let full_name = query.contains(' ');
    let hits = customers.retrieve_where(|c| {
        if full_name {
            c.name().contains(query)
        } else {
            c.first_name().contains(query)
        }
    });
    Ok(search_result(
        format!("Customers matching name [{}]", query),
        hits,
    ))
}

pub fn search_customer_by_phone(customers: &CustomerStore, phone: &str) -> Result<CmdResult> {
    let phone = phone.trim();
    let hits = customers.retrieve_where(|c| c.phone() == phone);
    Ok(search_result(
        format!("Customers with phone number [{}]", phone),
        hits,
    ))
}

fn search_result(title: String, hits: Vec<&Customer>) -> CmdResult {
    let mut result = CmdResult::default();
    if hits.is_empty() {
        result.add_message(CmdMessage::info("No one matches the search criteria!"));
    }
    result.add_view(format!(
        "{}\n{}",
        title,
        views::customer_table(views::sort_customers(hits))
    ));
    result
}

pub fn list_customers(customers: &CustomerStore) -> Result<CmdResult> {
    let sorted = views::sort_customers(customers.records());
    Ok(CmdResult::default().with_view(views::customer_table(sorted)))
}

/// Removes a customer. Orders that still reference it are kept and reported.
pub fn delete_customer(
    customers: &mut CustomerStore,
    orders: &OrderStore,
    code: &str,
) -> Result<CmdResult> {
    match customers.delete(&code.to_string()) {
        Ok(removed) => {
            let c = &removed.record;
            let mut result = CmdResult::default()
                .with_view(views::customer_card(c))
                .with_message(CmdMessage::success(format!(
                    "Delete customer with code [{}] successfully!",
                    c.code()
                )));
            let linked = orders.retrieve_where(|o| o.customer_code() == c.code()).len();
            if linked > 0 {
                result.add_message(CmdMessage::warning(format!(
                    "{} feast order(s) still reference customer [{}]",
                    linked,
                    c.code()
                )));
            }
            Ok(result.with_affected(Affected::Customer(removed)))
        }
        Err(e) => rejected("delete customer", e),
    }
}

pub fn restore_customer(
    customers: &mut CustomerStore,
    removed: Removed<Customer>,
) -> Result<CmdResult> {
    let code = removed.record.code().to_string();
    match customers.restore(removed) {
        Ok(_) => Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Undo deletion of customer with code [{}] successfully!",
            code
        )))),
        Err(e) => rejected(format!("undo deletion of customer [{}]", code), e),
    }
}

// --- Menus ---

pub fn list_menus(menus: &[FeastMenu]) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_view(views::menu_list(menus));
    if menus.is_empty() {
        result.add_message(CmdMessage::warning(
            "Can not read feast menus from file. Please check it!",
        ));
    }
    Ok(result)
}

// --- Orders ---

/// One past the highest id in the store. Ids of kept orders never change.
pub fn next_order_id(orders: &OrderStore) -> u32 {
    orders.records().iter().map(|o| o.id()).max().unwrap_or(0) + 1
}

#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub customer_code: String,
    pub menu_code: String,
    pub event_date: String,
    pub tables: u32,
}

pub fn place_order(
    orders: &mut OrderStore,
    customers: &CustomerStore,
    menus: &[FeastMenu],
    request: OrderRequest,
    today: NaiveDate,
) -> Result<CmdResult> {
    let order = FeastOrder::new(
        next_order_id(orders),
        request.customer_code.trim(),
        request.menu_code.trim(),
        request.event_date.trim(),
        request.tables,
    );
    let checked = validation::validate_future_date("event date", order.event_date(), today)
        .map_err(RegdeskError::from)
        .and_then(|_| {
            if order.tables() == 0 {
                Err(validation::ValidationError::new(
                    "number of tables",
                    "The number must be a positive integer!",
                )
                .into())
            } else {
                Ok(())
            }
        })
        .and_then(|_| require_customer(customers, order.customer_code()))
        .and_then(|_| require_menu(menus, order.menu_code()));
    if let Err(e) = checked {
        return rejected("create order", e);
    }

    let customer = customers.get(&order.customer_code().to_string());
    match orders.create(order) {
        Ok(o) => Ok(CmdResult::default()
            .with_view(views::order_card(o, customer, menus))
            .with_message(CmdMessage::success(format!(
                "Create order [#{}] with the menu code [{}] successfully!",
                o.id(),
                o.menu_code()
            )))),
        Err(e) => rejected("create order", e),
    }
}

pub fn view_order(
    orders: &OrderStore,
    customers: &CustomerStore,
    menus: &[FeastMenu],
    id: u32,
) -> Result<CmdResult> {
    match orders.retrieve(&id) {
        Ok(o) => {
            let customer = customers.get(&o.customer_code().to_string());
            Ok(CmdResult::default().with_view(views::order_card(o, customer, menus)))
        }
        Err(e) => rejected("find feast order", e),
    }
}

pub fn update_order(
    orders: &mut OrderStore,
    menus: &[FeastMenu],
    id: u32,
    field: OrderField,
    value: &str,
    today: NaiveDate,
) -> Result<CmdResult> {
    let action = format!("update {} of feast order [#{}]", field, id);
    let checked = orders
        .retrieve(&id)
        .and_then(|o| require_not_expired(o, today))
        .and_then(|_| match field {
            OrderField::MenuCode => require_menu(menus, value.trim()),
            OrderField::EventDate => validation::validate_future_date(&field.to_string(), value, today)
                .map(|_| ())
                .map_err(RegdeskError::from),
            _ => Ok(()),
        });
    if let Err(e) = checked {
        return rejected(action, e);
    }

    match orders.update(&id, field, value) {
        Ok(_) => Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Update [{}] of feast order with id [#{}] successfully!",
            field, id
        )))),
        Err(e) => rejected(action, e),
    }
}

pub fn list_orders(orders: &OrderStore, menus: &[FeastMenu]) -> Result<CmdResult> {
    let sorted = views::sort_orders(orders.records());
    Ok(CmdResult::default().with_view(views::order_table(sorted, menus)))
}

pub fn delete_order(
    orders: &mut OrderStore,
    customers: &CustomerStore,
    menus: &[FeastMenu],
    id: u32,
) -> Result<CmdResult> {
    match orders.delete(&id) {
        Ok(removed) => {
            let o = &removed.record;
            let customer = customers.get(&o.customer_code().to_string());
            let result = CmdResult::default()
                .with_view(views::order_card(o, customer, menus))
                .with_message(CmdMessage::success(format!(
                    "Delete order [#{}] with the menu code [{}] successfully!",
                    o.id(),
                    o.menu_code()
                )));
            Ok(result.with_affected(Affected::Order(removed)))
        }
        Err(e) => rejected("delete feast order", e),
    }
}

pub fn restore_order(orders: &mut OrderStore, removed: Removed<FeastOrder>) -> Result<CmdResult> {
    let id = removed.record.id();
    match orders.restore(removed) {
        Ok(_) => Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Undo deletion of order [#{}] successfully!",
            id
        )))),
        Err(e) => rejected(format!("undo deletion of order [#{}]", id), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreOrder;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn menus() -> Vec<FeastMenu> {
        vec![
            FeastMenu {
                code: "PW001".to_string(),
                name: "Wedding party 01".to_string(),
                price: 1_250_000.0,
                ingredients: vec!["Soup".to_string()],
            },
            FeastMenu {
                code: "PW002".to_string(),
                name: "Birthday party".to_string(),
                price: 900_000.0,
                ingredients: vec!["Cake".to_string()],
            },
        ]
    }

    fn customers() -> CustomerStore {
        let mut store = RecordStore::new(StoreOrder::Insertion);
        for c in [
            Customer::new("C0001", "Nguyen Van An", "an@x.vn", "0912345678"),
            Customer::new("G0002", "Tran Thi Binh", "binh@x.vn", "0371234567"),
            Customer::new("K0003", "Le Anh", "anh@x.vn", "0851234567"),
        ] {
            register_customer(&mut store, c).unwrap();
        }
        store
    }

    fn request(customer: &str, menu: &str, date: &str, tables: u32) -> OrderRequest {
        OrderRequest {
            customer_code: customer.to_string(),
            menu_code: menu.to_string(),
            event_date: date.to_string(),
            tables,
        }
    }

    fn with_order() -> (OrderStore, CustomerStore) {
        let customers = customers();
        let mut orders = RecordStore::new(StoreOrder::Insertion);
        place_order(&mut orders, &customers, &menus(), request("C0001", "PW001", "10/10/2026", 3), today())
            .unwrap();
        (orders, customers)
    }

    #[test]
    fn register_rejects_duplicate_code_and_bad_phone() {
        let mut store = customers();
        let dup = register_customer(
            &mut store,
            Customer::new("C0001", "Pham Dung", "dung@x.vn", "0912345000"),
        )
        .unwrap();
        assert!(dup.has_errors());

        let bad_phone = register_customer(
            &mut store,
            Customer::new("C0009", "Pham Dung", "dung@x.vn", "0212345000"),
        )
        .unwrap();
        assert!(bad_phone.has_errors());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn name_search_uses_first_name_for_single_words() {
        let store = customers();
        let result = search_customers_by_name(&store, "An").unwrap();
        let view = &result.views[0];
        assert!(view.contains("C0001"));
        assert!(view.contains("K0003"));
        assert!(!view.contains("G0002"));

        let full = search_customers_by_name(&store, "Thi Binh").unwrap();
        assert!(full.views[0].contains("G0002"));
        assert!(!full.views[0].contains("C0001"));
    }

    #[test]
    fn name_search_reports_no_match() {
        let store = customers();
        let result = search_customers_by_name(&store, "Zed").unwrap();
        assert_eq!(result.messages.len(), 1);
        assert!(result.views[0].contains("N/A"));
    }

    #[test]
    fn phone_search_is_exact() {
        let store = customers();
        let result = search_customer_by_phone(&store, "0371234567").unwrap();
        assert!(result.views[0].contains("G0002"));
        assert!(result.messages.is_empty());
    }

    #[test]
    fn place_order_assigns_ids_and_costs() {
        let (mut orders, customers) = with_order();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders.records()[0].id(), 1);

        let result = place_order(
            &mut orders,
            &customers,
            &menus(),
            request("G0002", "PW002", "11/10/2026", 2),
            today(),
        )
        .unwrap();
        assert!(!result.has_errors());
        assert_eq!(next_order_id(&orders), 3);

        let listed = list_orders(&orders, &menus()).unwrap();
        assert!(listed.views[0].contains("3,750,000"));
        assert!(listed.views[0].contains("1,800,000"));
    }

    #[test]
    fn place_order_rejects_unknown_references_and_duplicates() {
        let (mut orders, customers) = with_order();
        let m = menus();

        let unknown_customer =
            place_order(&mut orders, &customers, &m, request("C9999", "PW001", "10/10/2026", 1), today())
                .unwrap();
        assert!(unknown_customer.messages[0].content.contains("customer code [C9999]"));

        let unknown_menu =
            place_order(&mut orders, &customers, &m, request("C0001", "PW404", "10/10/2026", 1), today())
                .unwrap();
        assert!(unknown_menu.messages[0].content.contains("feast menu code [PW404]"));

        let duplicate =
            place_order(&mut orders, &customers, &m, request("C0001", "PW001", "10/10/2026", 9), today())
                .unwrap();
        assert!(duplicate.messages[0].content.contains("Duplicated data"));

        let past =
            place_order(&mut orders, &customers, &m, request("C0001", "PW002", "01/01/2020", 1), today())
                .unwrap();
        assert!(past.has_errors());

        assert_eq!(orders.len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let (mut orders, customers) = with_order();
        let m = menus();
        place_order(&mut orders, &customers, &m, request("G0002", "PW001", "12/10/2026", 1), today())
            .unwrap();
        delete_order(&mut orders, &customers, &m, 1).unwrap();
        assert_eq!(next_order_id(&orders), 3);
    }

    #[test]
    fn update_order_checks_menu_and_date() {
        let (mut orders, _) = with_order();
        let m = menus();

        let bad_menu = update_order(&mut orders, &m, 1, OrderField::MenuCode, "PW404", today()).unwrap();
        assert!(bad_menu.has_errors());

        let past_date =
            update_order(&mut orders, &m, 1, OrderField::EventDate, "01/01/2020", today()).unwrap();
        assert!(past_date.has_errors());

        let ok = update_order(&mut orders, &m, 1, OrderField::Tables, "7", today()).unwrap();
        assert!(!ok.has_errors());
        assert_eq!(orders.retrieve(&1).unwrap().tables(), 7);
    }

    #[test]
    fn expired_orders_cannot_be_updated() {
        let (mut orders, _) = with_order();
        let later = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
        let result = update_order(&mut orders, &menus(), 1, OrderField::Tables, "5", later).unwrap();
        assert!(result.messages[0].content.contains("expired"));
        assert_eq!(orders.retrieve(&1).unwrap().tables(), 3);
    }

    #[test]
    fn deleting_customer_warns_about_orders_and_can_be_undone() {
        let (orders, mut customers) = with_order();
        let mut result = delete_customer(&mut customers, &orders, "C0001").unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == crate::commands::MessageLevel::Warning));

        let Some(Affected::Customer(c)) = result.affected.pop() else {
            panic!("expected removed customer");
        };
        restore_customer(&mut customers, c).unwrap();
        assert!(customers.contains(&"C0001".to_string()));
    }

    #[test]
    fn undo_puts_customer_and_order_back_in_place() {
        let (mut orders, mut customers) = with_order();
        let m = menus();
        place_order(&mut orders, &customers, &m, request("G0002", "PW002", "12/10/2026", 2), today())
            .unwrap();
        let customers_before = customers.records().to_vec();
        let orders_before = orders.records().to_vec();

        let mut result = delete_customer(&mut customers, &orders, "C0001").unwrap();
        let Some(Affected::Customer(c)) = result.affected.pop() else {
            panic!("expected removed customer");
        };
        restore_customer(&mut customers, c).unwrap();
        assert_eq!(customers.records(), customers_before.as_slice());

        let mut result = delete_order(&mut orders, &customers, &m, 1).unwrap();
        let Some(Affected::Order(o)) = result.affected.pop() else {
            panic!("expected removed order");
        };
        restore_order(&mut orders, o).unwrap();
        assert_eq!(orders.records(), orders_before.as_slice());
    }

    #[test]
    fn customers_list_sorted_by_first_name() {
        let store = customers();
        let view = &list_customers(&store).unwrap().views[0];
        let an = view.find("An, Nguyen Van").unwrap();
        let anh = view.find("Anh, Le").unwrap();
        let binh = view.find("Binh, Tran Thi").unwrap();
        assert!(an < anh && anh < binh);
    }
}
