//! Menu loop for the feast desk.

use std::io::{BufRead, Write};

use regdesk::api::FeastDesk;
use regdesk::commands::feasts::OrderRequest;
use regdesk::commands::Affected;
use regdesk::error::Result;
use regdesk::model::{Customer, CustomerField, FeastOrder, OrderField, CUSTOMER_NAME_LEN};
use regdesk::persist::ListBackend;
use regdesk::validation::Pattern;

use super::render;
use super::terminal::Prompter;

const TITLE: &str = "Traditional Feast Order Management";

const MENU: [&str; 11] = [
    "Register customers.",
    "Update customer information.",
    "Search for customer information by name.",
    "Search for customer information by phone.",
    "Display feast menus.",
    "Place a feast order.",
    "Update order information.",
    "Delete a customer or an order.",
    "Display Customer or Order lists.",
    "Save data to file.",
    "Quit.",
];

const CUSTOMER_OPTIONS: [&str; 3] = ["Name", "Phone Number", "Email"];
const ORDER_OPTIONS: [&str; 3] = ["Code of Set Menu", "Number of Tables", "Preferred Event Date"];
const LIST_OPTIONS: [&str; 2] = ["Display Customer lists.", "Display Order lists."];
const DELETE_OPTIONS: [&str; 2] = ["Delete a customer.", "Delete a feast order."];

pub(super) fn session<CB, OB, R, W>(desk: &mut FeastDesk<CB, OB>, term: &mut Prompter<R, W>) -> Result<()>
where
    CB: ListBackend<Customer>,
    OB: ListBackend<FeastOrder>,
    R: BufRead,
    W: Write,
{
    writeln!(term.out(), "\n{}", TITLE)?;
    loop {
        render::write_line(term.out())?;
        let choice = term.menu("Main Menu Options", &MENU, "choice")?;
        render::write_line(term.out())?;
        writeln!(term.out(), ">>{}", MENU[choice - 1])?;

        match choice {
            1 => register_customer(desk, term)?,
            2 => update_customer(desk, term)?,
            3 => {
                let query = term.prompt_name("customer name", CUSTOMER_NAME_LEN)?;
                term.show(&desk.search_customers_by_name(&query)?)?;
            }
            4 => {
                let phone = term.prompt_pattern("phone number", Pattern::PhoneSearch)?;
                term.show(&desk.search_customer_by_phone(&phone)?)?;
            }
            5 => term.show(&desk.list_menus()?)?,
            6 => place_order(desk, term)?,
            7 => update_order(desk, term)?,
            8 => delete(desk, term)?,
            9 => {
                let result = match term.menu("Display list", &LIST_OPTIONS, "display list")? {
                    1 => desk.list_customers()?,
                    _ => desk.list_orders()?,
                };
                term.show(&result)?;
            }
            10 => {
                term.show(&desk.save()?)?;
                continue;
            }
            _ => {
                if desk.has_unsaved_changes() && term.prompt_confirm("save the current changes")? {
                    term.show(&desk.save()?)?;
                }
                writeln!(term.out(), "Thank you for using the feast order management program!")?;
                return Ok(());
            }
        }

        render::write_line(term.out())?;
        term.pause()?;
    }
}

fn register_customer<CB, OB, R, W>(desk: &mut FeastDesk<CB, OB>, term: &mut Prompter<R, W>) -> Result<()>
where
    CB: ListBackend<Customer>,
    OB: ListBackend<FeastOrder>,
    R: BufRead,
    W: Write,
{
    loop {
        let code = term.prompt_pattern("customer code", Pattern::CustomerCode)?;
        let name = term.prompt_name("customer name", CUSTOMER_NAME_LEN)?;
        let phone = term.prompt_pattern("phone number", Pattern::CustomerPhone)?;
        let email = term.prompt_pattern("email", Pattern::Email)?;
        term.show(&desk.register_customer(Customer::new(code, name, email, phone))?)?;

        if !term.prompt_confirm("register another customer")? {
            return Ok(());
        }
    }
}

fn update_customer<CB, OB, R, W>(desk: &mut FeastDesk<CB, OB>, term: &mut Prompter<R, W>) -> Result<()>
where
    CB: ListBackend<Customer>,
    OB: ListBackend<FeastOrder>,
    R: BufRead,
    W: Write,
{
    let code = term.prompt_pattern("customer code", Pattern::CustomerCode)?;
    let found = desk.view_customer(&code)?;
    term.show(&found)?;
    if found.has_errors() {
        return Ok(());
    }

    let choice = term.menu(
        "Update Customer Information Options",
        &CUSTOMER_OPTIONS,
        "update customer information options",
    )?;
    let field = CustomerField::EDITABLE[choice - 1];
    let value = match field {
        CustomerField::Name => term.prompt_name("customer name", CUSTOMER_NAME_LEN)?,
        CustomerField::Phone => term.prompt_pattern("phone number", Pattern::CustomerPhone)?,
        _ => term.prompt_pattern("email", Pattern::Email)?,
    };
    term.show(&desk.update_customer(&code, field, &value)?)
}

fn place_order<CB, OB, R, W>(desk: &mut FeastDesk<CB, OB>, term: &mut Prompter<R, W>) -> Result<()>
where
    CB: ListBackend<Customer>,
    OB: ListBackend<FeastOrder>,
    R: BufRead,
    W: Write,
{
    let customer_code = term.prompt_pattern("customer code", Pattern::CustomerCode)?;
    if !desk.customers().contains(&customer_code) {
        return term.show(&desk.view_customer(&customer_code)?);
    }

    term.show(&desk.list_menus()?)?;
    let menu_code = term.prompt_pattern("code of set menu", Pattern::MenuCode)?;
    let tables = term.prompt_positive("number of tables")?;
    let today = desk.today();
    let event_date = term.prompt_future_date("preferred event date", today)?;

    let result = desk.place_order(OrderRequest {
        customer_code,
        menu_code,
        event_date,
        tables,
    })?;
    term.show(&result)
}

fn update_order<CB, OB, R, W>(desk: &mut FeastDesk<CB, OB>, term: &mut Prompter<R, W>) -> Result<()>
where
    CB: ListBackend<Customer>,
    OB: ListBackend<FeastOrder>,
    R: BufRead,
    W: Write,
{
    let id = term.prompt_positive("order id")?;
    let found = desk.view_order(id)?;
    term.show(&found)?;
    if found.has_errors() {
        return Ok(());
    }

    let choice = term.menu(
        "Update Feast Order Information Options",
        &ORDER_OPTIONS,
        "update feast order information options",
    )?;
    let field = OrderField::EDITABLE[choice - 1];
    let value = match field {
        OrderField::MenuCode => term.prompt_pattern("code of set menu", Pattern::MenuCode)?,
        OrderField::Tables => term.prompt_positive("number of tables")?.to_string(),
        _ => {
            let today = desk.today();
            term.prompt_future_date("preferred event date", today)?
        }
    };
    term.show(&desk.update_order(id, field, &value)?)
}

/// Deletes a customer or an order, then offers to take it back.
fn delete<CB, OB, R, W>(desk: &mut FeastDesk<CB, OB>, term: &mut Prompter<R, W>) -> Result<()>
where
    CB: ListBackend<Customer>,
    OB: ListBackend<FeastOrder>,
    R: BufRead,
    W: Write,
{
    let mut result = match term.menu("Delete Options", &DELETE_OPTIONS, "delete option")? {
        1 => {
            let code = term.prompt_pattern("customer code", Pattern::CustomerCode)?;
            desk.delete_customer(&code)?
        }
        _ => {
            let id = term.prompt_positive("order id")?;
            desk.delete_order(id)?
        }
    };
    term.show(&result)?;

    match result.affected.pop() {
        Some(Affected::Customer(customer)) => {
            if !term.prompt_confirm("delete customer")? {
                term.show(&desk.restore_customer(customer)?)?;
            }
        }
        Some(Affected::Order(order)) => {
            if !term.prompt_confirm("delete feast order")? {
                term.show(&desk.restore_order(order)?)?;
            }
        }
        _ => {}
    }
    Ok(())
}
