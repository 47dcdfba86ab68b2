//! Console frontend: a line-oriented shell over the catalog session.
//! Presentation only; all behavior lives in `catalogo::ui`.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use catalogo::telemetry::setup_tracing;
use catalogo::ui::{
    CatalogApi, CatalogSession, HttpCatalog, SortDirection, SortField, SortSpec,
};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let base_url = catalogo::config::client_base_url();
    let mut session = CatalogSession::new(HttpCatalog::new(base_url));
    session.refresh(Instant::now()).await;
    render(&session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;
        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| e.to_string())?
            == 0
        {
            break;
        }
        let now = Instant::now();
        session.tick(now);

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            ["sair"] => break,
            ["listar"] => session.refresh(now).await,
            ["novo", rest @ ..] if rest.len() >= 3 => {
                session.begin_create();
                fill_form(&mut session, rest);
                session.submit(now).await;
            }
            ["editar", id, rest @ ..] if rest.len() >= 3 => match id.parse::<u64>() {
                Ok(id) if session.begin_edit(id) => {
                    fill_form(&mut session, rest);
                    session.submit(now).await;
                }
                _ => println!("produto desconhecido: {id}"),
            },
            ["excluir", id] => match id.parse::<u64>() {
                Ok(id) => {
                    session.request_delete(id);
                    println!("confirme com 'confirmar' (ou 'cancelar')");
                }
                Err(_) => println!("id inválido: {id}"),
            },
            ["confirmar"] => session.confirm_delete(now).await,
            ["cancelar"] => session.cancel_delete(),
            ["filtro"] => session.filter.clear(),
            ["filtro", rest @ ..] => session.filter = rest.join(" "),
            ["ordenar", field] => set_sort(&mut session, field, "asc"),
            ["ordenar", field, direction] => set_sort(&mut session, field, direction),
            _ => print_help(),
        }
        render(&session);
    }
    Ok(())
}

/// `rest` is `nome... preco quantidade`; multi-word names are allowed.
fn fill_form<A: CatalogApi>(session: &mut CatalogSession<A>, rest: &[&str]) {
    let (name, numbers) = rest.split_at(rest.len() - 2);
    if let Some(form) = session.form_mut() {
        form.name = name.join(" ");
        form.price = numbers[0].to_string();
        form.quantity = numbers[1].to_string();
    }
}

fn set_sort<A: CatalogApi>(session: &mut CatalogSession<A>, field: &str, direction: &str) {
    let field = match field {
        "nome" => SortField::Name,
        "preco" => SortField::Price,
        "quantidade" => SortField::Quantity,
        _ => {
            println!("campo desconhecido: {field}");
            return;
        }
    };
    let direction = match direction {
        "desc" => SortDirection::Descending,
        _ => SortDirection::Ascending,
    };
    session.sort = SortSpec { field, direction };
}

fn render<A: CatalogApi>(session: &CatalogSession<A>) {
    if let Some(feedback) = session.feedback() {
        println!("[{}]", feedback.text);
    }
    for product in session.visible_products() {
        println!(
            "{:>4}  {:<30} R$ {:>8.2}  x{}",
            product.id, product.name, product.price, product.quantity
        );
    }
}

fn print_help() {
    println!("comandos: listar | novo <nome> <preco> <quantidade>");
    println!("          editar <id> <nome> <preco> <quantidade>");
    println!("          excluir <id> | confirmar | cancelar");
    println!("          filtro [texto] | ordenar <campo> [asc|desc] | sair");
}
