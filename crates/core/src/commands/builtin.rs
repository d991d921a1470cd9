//! The `/pets` command shipped with the plugin.

use super::{
    ArgumentDescriptor, CommandDescriptor, CommandError, CommandOutcome, CommandResult,
    ExecutionContext, InternalError, RoutedCommand, RoutedCommandBuilder, RuntimeError,
};
use crate::config::PluginConfig;
use crate::keys::NamespacedKey;
use crate::pets::catalog::DefaultPetNode;
use crate::pets::PetKeyManager;
use crate::text::{ColorCode, TextComponent, TextComponentBuilder};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

pub const PETS_COMMAND: &str = "pets";

fn format_permission(permission: &str) -> &str {
    if permission.is_empty() {
        "none"
    } else {
        permission
    }
}

fn exec_list(
    ctx: &mut ExecutionContext<'_>,
    pets: &RefCell<PetKeyManager>,
    page_size: usize,
) -> CommandResult<CommandOutcome> {
    let page = match ctx.args().get(1) {
        Some(page) => page
            .parse::<usize>()
            .ok()
            .filter(|page| *page > 0)
            .ok_or_else(|| RuntimeError::InvalidArgument {
                name: "page".to_string(),
                value: page.to_string(),
            })?,
        None => 1,
    };

    let keys = pets.borrow().all();
    let pages = keys.len().div_ceil(page_size).max(1);
    if page > pages {
        return Err(RuntimeError::InvalidArgument {
            name: "page".to_string(),
            value: page.to_string(),
        }
        .into());
    }

    ctx.send(TextComponent::colored(
        format!("Pet keys ({} total, page {}/{}):", keys.len(), page, pages),
        ColorCode::Gold,
    ));
    for entry in keys.iter().skip((page - 1) * page_size).take(page_size) {
        ctx.send(
            TextComponentBuilder::new(format!(" {}:{}", entry.namespace, entry.key))
                .color(ColorCode::Yellow)
                .extra(TextComponent::colored(
                    format!(" ({})", format_permission(&entry.permission)),
                    ColorCode::Gray,
                ))
                .finish(),
        );
    }
    Ok(CommandOutcome::Handled)
}

fn exec_info(
    ctx: &mut ExecutionContext<'_>,
    pets: &RefCell<PetKeyManager>,
) -> CommandResult<CommandOutcome> {
    let raw = ctx.args().require(1, "namespace:key")?;
    let key: NamespacedKey = raw.parse().map_err(|_| RuntimeError::InvalidArgument {
        name: "key".to_string(),
        value: raw.to_string(),
    })?;

    let pets = pets.borrow();
    let Some(entry) = pets.find_by_key(&key) else {
        return Err(CommandError::runtime(format!("No pet is registered as {key}")));
    };

    let origin = match DefaultPetNode::from_item_key(&key) {
        Some(node) => format!("built-in {node}"),
        None => "pets-data.yml".to_string(),
    };
    ctx.reply(&format!(
        "{}: permission {}, from {}",
        key,
        format_permission(&entry.permission),
        origin
    ));
    Ok(CommandOutcome::Handled)
}

fn exec_perm(
    ctx: &mut ExecutionContext<'_>,
    pets: &RefCell<PetKeyManager>,
) -> CommandResult<CommandOutcome> {
    let node = ctx.args().require(1, "permission")?;
    if let Some(pet) = DefaultPetNode::from_permission(node) {
        ctx.reply(&format!("{} unlocks {} ({})", node, pet, pet.namespaced()));
        return Ok(CommandOutcome::Handled);
    }
    let pets = pets.borrow();
    match pets.find_by_permission(node) {
        Some(entry) => {
            ctx.reply(&format!("{} unlocks {}:{}", node, entry.namespace, entry.key));
            Ok(CommandOutcome::Handled)
        }
        None => Err(CommandError::runtime(format!("No pet uses permission {node}"))),
    }
}

fn exec_reload(
    ctx: &mut ExecutionContext<'_>,
    pets: &RefCell<PetKeyManager>,
) -> CommandResult<CommandOutcome> {
    let mut pets = pets.borrow_mut();
    let merged = pets.load().map_err(|err| InternalError::Reload {
        message: format!("{err:#}"),
    })?;
    info!("{} reloaded pet keys ({} from file)", ctx.sender().name(), merged);
    ctx.reply(&format!(
        "Reloaded {} pet keys ({} from {}).",
        pets.len(),
        merged,
        pets.config_path().display()
    ));
    Ok(CommandOutcome::Handled)
}

fn exec_help(ctx: &mut ExecutionContext<'_>) -> CommandResult<CommandOutcome> {
    let label = ctx.label().to_string();
    ctx.send(
        TextComponentBuilder::new("Pet commands:")
            .color(ColorCode::Gold)
            .bold(true)
            .finish(),
    );
    for (usage, description) in [
        ("list [page]", "List registered pet keys"),
        ("info <namespace:key>", "Show a pet key's permission"),
        ("perm <permission>", "Find the pet a permission unlocks"),
        ("reload", "Reload pets-data.yml"),
    ] {
        ctx.reply(&format!(" /{label} {usage} - {description}"));
    }
    Ok(CommandOutcome::Handled)
}

/// The `/pets` dispatch table, ready to be registered.
pub fn pets_command(pets: Rc<RefCell<PetKeyManager>>, config: &PluginConfig) -> RoutedCommandBuilder {
    let page_size = config.page_size();
    let list_pets = Rc::clone(&pets);
    let info_pets = Rc::clone(&pets);
    let perm_pets = Rc::clone(&pets);

    RoutedCommand::builder(CommandDescriptor::new(PETS_COMMAND).alias("pet").alias("mcpets"))
        .messages(config.messages())
        .argument(
            ArgumentDescriptor::new("list")
                .alias("ls")
                .require_permission("mcpets.list"),
            move |ctx| exec_list(ctx, &list_pets, page_size),
        )
        .argument(
            ArgumentDescriptor::new("info").require_permission("mcpets.info"),
            move |ctx| exec_info(ctx, &info_pets),
        )
        .argument(
            ArgumentDescriptor::new("perm").alias("permission"),
            move |ctx| exec_perm(ctx, &perm_pets),
        )
        .argument(ArgumentDescriptor::new("default").alias("help"), exec_help)
        .command(CommandDescriptor::new("reload").admin(), move |ctx| {
            exec_reload(ctx, &pets)
        })
}
