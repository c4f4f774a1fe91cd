use std::io::{self, BufRead, Write};

use todos_app::features::profile::ProfileMode;
use todos_app::features::todo::MenuEntry;
use todos_app::{render, App, Config, ItemId, Page, UreqTransport};
use todos_core::{ApiClient, Backend, TodoUpdate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
commands:
  go <login|register|profile|todo>   switch page
  set <Field Name>=<value>           fill a form field on the current page
  submit                             login / register / update profile
  password                           change password (profile edit mode)
  edit | view                        profile mode
  logout | refresh-token
  list <name|all>                    select a list
  new-list <name> | rename <name> | delete-list
  add <description>                  new todo in the default list
  done <n> | undo <n> | rm <n>       todo by row number
  hide on|off                        hide completed todos
  dismiss <alert id>
  quit";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| "todos_app=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!(api_url = %config.api_url, "starting");
    let backend = Backend::new(
        ApiClient::new(&config.api_url),
        UreqTransport::new(config.http_timeout),
    );
    let mut app = App::new(backend);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("{}", render(&app));
    println!("{HELP}");

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line == "quit" || line == "exit" {
            break;
        }
        if !line.is_empty() {
            run_command(&mut app, line);
        }
        print!("\n{}> ", render(&app));
        stdout.flush()?;
    }
    Ok(())
}

fn run_command(app: &mut App<UreqTransport>, line: &str) {
    let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
    let arg = arg.trim();

    match command {
        "help" => println!("{HELP}"),
        "go" => {
            if !app.navigate_hash(arg) {
                println!("unknown page '{arg}'");
            }
        }
        "set" => set_field(app, arg),
        "submit" => match app.page() {
            Page::Login => {
                app.submit_login();
            }
            Page::Register => {
                app.submit_register();
            }
            Page::Profile => {
                app.with_profile(|p, ctx, token| p.update_info(ctx, token));
            }
            Page::Todo => println!("nothing to submit"),
        },
        "password" => {
            app.with_profile(|p, ctx, token| p.change_password(ctx, token));
        }
        "edit" | "view" => {
            let mode = if command == "edit" { ProfileMode::Edit } else { ProfileMode::View };
            app.with_profile(|p, ctx, token| p.set_mode(mode, ctx, token));
        }
        "logout" => {
            app.logout();
        }
        "refresh-token" => {
            app.refresh_session();
        }
        "list" => {
            let found = app.with_todo(|page, _, _| {
                let selection = page
                    .menu()
                    .iter()
                    .find(|e| matches!(e, MenuEntry::All if arg.eq_ignore_ascii_case("all")) || e.label() == arg)
                    .and_then(MenuEntry::selection);
                selection.map(|s| page.select(s))
            });
            if !matches!(found, Some(Some(true))) {
                println!("no list '{arg}'");
            }
        }
        "new-list" => {
            app.with_todo(|page, ctx, token| page.create_list(arg, ctx, token));
        }
        "rename" => {
            app.with_todo(|page, ctx, token| page.update_list(arg, ctx, token));
        }
        "delete-list" => {
            app.with_todo(|page, ctx, token| page.delete_list(ctx, token));
        }
        "add" => {
            app.with_todo(|page, ctx, token| match page.default_list_for_new_todo() {
                Some(list_id) => page.create_todo(list_id, arg, false, ctx, token),
                None => false,
            });
        }
        "done" | "undo" | "rm" => {
            let Ok(row) = arg.parse::<usize>() else {
                println!("expected a row number");
                return;
            };
            app.with_todo(|page, ctx, token| {
                let Some(todo) = row.checked_sub(1).and_then(|i| page.active().todos.get(i)).cloned() else {
                    return false;
                };
                if command == "rm" {
                    return page.delete_todo(todo.todo_id, ctx, token);
                }
                page.open_todo(todo.todo_id);
                let update = TodoUpdate {
                    todo_list_id: todo.todo_list_id,
                    description: todo.description,
                    completed: command == "done",
                };
                page.update_todo(todo.todo_id, update, ctx, token)
            });
        }
        "hide" => {
            let hide = arg == "on";
            app.with_todo(|page, ctx, token| page.set_hide_completed(hide, ctx, token));
        }
        "dismiss" => match arg.parse::<ItemId>() {
            Ok(id) if app.dismiss_alert(id) => {}
            _ => println!("no alert '{arg}'"),
        },
        other => println!("unknown command '{other}', try 'help'"),
    }
}

fn set_field(app: &mut App<UreqTransport>, arg: &str) {
    let Some((name, value)) = arg.split_once('=') else {
        println!("expected <Field Name>=<value>");
        return;
    };
    let (name, value) = (name.trim(), value.trim());

    let updated = if let Some(login) = app.login_form_mut() {
        login.form.set_text(name, value)
    } else if let Some(register) = app.register_form_mut() {
        register.form.set_text(name, value)
    } else {
        app.with_profile(|p, _, _| {
            p.edit_form.set_text(name, value) || p.password_form.set_text(name, value)
        })
        .unwrap_or(false)
    };
    if !updated {
        println!("no editable field '{name}' here");
    }
}
