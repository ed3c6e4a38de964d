//! Command router: turns pointer and key events into menus and commands.
//!
//! Stateless apart from the grid pick plane it was built with. The only
//! interaction state, the pending move order, lives in the simulation.

use serde::{Deserialize, Serialize};

use armada_core::commands::PlayerCommand;
use armada_core::enums::{Key, UnitKind};
use armada_core::grid::world_to_grid;
use armada_core::render::RenderAdapter;
use armada_core::types::{GridCell, RenderHandle, ScreenPoint, UnitId};

use crate::engine::Simulation;

/// What a menu entry does when chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuAction {
    CreateShip { cell: GridCell },
    MoveTo { ship: UnitId },
    MoveHere { cell: GridCell },
    CreateShipFromStation { station: UnitId },
    ToggleFactionAi { station: UnitId },
    Cancel,
}

impl MenuAction {
    pub fn to_command(self) -> PlayerCommand {
        match self {
            MenuAction::CreateShip { cell } => PlayerCommand::CreateShip { cell },
            MenuAction::MoveTo { ship } => PlayerCommand::OrderMove { ship },
            MenuAction::MoveHere { cell } => PlayerCommand::SelectMoveTarget { cell },
            MenuAction::CreateShipFromStation { station } => PlayerCommand::CreateShipFromStation { station },
            MenuAction::ToggleFactionAi { station } => PlayerCommand::ToggleFactionAi { station },
            MenuAction::Cancel => PlayerCommand::CancelMove,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
    pub enabled: bool,
}

impl MenuItem {
    fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action,
            enabled: true,
        }
    }
}

/// Bold header line naming the clicked unit, in its faction's color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuTitle {
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextMenu {
    pub title: Option<MenuTitle>,
    pub items: Vec<MenuItem>,
}

impl ContextMenu {
    /// First item with this label.
    pub fn item(&self, label: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.label == label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The pending move order was completed; `cell` is the free cell the
    /// ship is heading for, which may differ from the clicked one.
    MoveIssued { ship: UnitId, cell: GridCell },
    Menu(ContextMenu),
    Nothing,
}

#[derive(Debug, Clone, Copy)]
pub struct CommandRouter {
    grid_plane: RenderHandle,
}

impl CommandRouter {
    /// `grid_plane` is the render object used to pick grid cells.
    pub fn new(grid_plane: RenderHandle) -> Self {
        Self { grid_plane }
    }

    /// Primary click. Completes a pending move order when the pointer is
    /// over the grid; otherwise opens the menu for whatever is under it.
    pub fn click<R: RenderAdapter>(&self, sim: &mut Simulation<R>, screen: ScreenPoint) -> ClickOutcome {
        if sim.pending_move().is_some() {
            if let Some(cell) = self.grid_cell_at(sim, screen) {
                return match sim.complete_pending_move(cell) {
                    Some((ship, Some(resolved))) => ClickOutcome::MoveIssued { ship, cell: resolved },
                    _ => ClickOutcome::Nothing,
                };
            }
        }
        self.menu_at(sim, screen)
    }

    /// Secondary (context) click. While a move order is pending this offers
    /// "Move here" / "Cancel" for the cell under the pointer.
    pub fn context_click<R: RenderAdapter>(&self, sim: &Simulation<R>, screen: ScreenPoint) -> ClickOutcome {
        if sim.pending_move().is_some() {
            return match self.grid_cell_at(sim, screen) {
                Some(cell) => ClickOutcome::Menu(ContextMenu {
                    title: None,
                    items: vec![
                        MenuItem::new("Move here", MenuAction::MoveHere { cell }),
                        MenuItem::new("Cancel", MenuAction::Cancel),
                    ],
                }),
                None => ClickOutcome::Nothing,
            };
        }
        self.menu_at(sim, screen)
    }

    /// Execute a chosen menu item. Disabled items do nothing.
    pub fn apply<R: RenderAdapter>(&self, sim: &mut Simulation<R>, item: &MenuItem) -> bool {
        if !item.enabled {
            return false;
        }
        sim.execute(item.action.to_command());
        true
    }

    /// Escape clears the pending move order unconditionally.
    pub fn key_press<R: RenderAdapter>(&self, sim: &mut Simulation<R>, key: Key) -> bool {
        match key {
            Key::Escape => {
                sim.cancel_pending_move();
                true
            }
            Key::Other => false,
        }
    }

    fn grid_cell_at<R: RenderAdapter>(&self, sim: &Simulation<R>, screen: ScreenPoint) -> Option<GridCell> {
        sim.renderer()
            .intersect_ray(screen, &[self.grid_plane])
            .first()
            .map(|hit| world_to_grid(hit.point))
    }

    fn menu_at<R: RenderAdapter>(&self, sim: &Simulation<R>, screen: ScreenPoint) -> ClickOutcome {
        let handles = sim.all_render_handles();
        let hits = sim.renderer().intersect_ray(screen, &handles);
        if let Some(hit) = hits.first() {
            if let Some(menu) = sim
                .find_unit_by_render_handle(hit.handle)
                .ok()
                .and_then(|unit| unit_menu(sim, unit))
            {
                return ClickOutcome::Menu(menu);
            }
        }

        match self.grid_cell_at(sim, screen) {
            Some(cell) => ClickOutcome::Menu(ContextMenu {
                title: None,
                items: vec![MenuItem::new("Create Ship", MenuAction::CreateShip { cell })],
            }),
            None => ClickOutcome::Nothing,
        }
    }
}

fn unit_menu<R: RenderAdapter>(sim: &Simulation<R>, id: UnitId) -> Option<ContextMenu> {
    let view = sim.unit(id)?;
    let faction = sim.factions().get(&view.faction).ok()?;
    let player_owned = sim.factions().is_player(&view.faction);

    let title = MenuTitle {
        text: format!("{} {}", faction.name, view.kind),
        color: faction.css_color(),
    };

    let mut items = Vec::new();
    match view.kind {
        UnitKind::Ship if player_owned => {
            items.push(MenuItem::new("Move to...", MenuAction::MoveTo { ship: id }));
        }
        UnitKind::Station if player_owned => {
            let remaining = sim.production_remaining_secs(id);
            if remaining > 0.0 {
                items.push(MenuItem {
                    label: format!("Create Ship ({}s)", remaining.ceil() as u64),
                    action: MenuAction::CreateShipFromStation { station: id },
                    enabled: false,
                });
            } else {
                items.push(MenuItem::new(
                    "Create Ship",
                    MenuAction::CreateShipFromStation { station: id },
                ));
            }
            let toggle = if faction.auto_controlled {
                "Disable AI control"
            } else {
                "Enable AI control"
            };
            items.push(MenuItem::new(toggle, MenuAction::ToggleFactionAi { station: id }));
        }
        _ => {}
    }

    Some(ContextMenu {
        title: Some(title),
        items,
    })
}
