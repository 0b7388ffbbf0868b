// Game logic: the tank range, the model viewer and the menus around them
//
// - `tuning`: gameplay constants
// - `entities`: player, enemies, shell
// - `combat`: shell flight, hit test, respawn policy
// - `session`: one game, tick by tick
// - `scenery`: light rig and gizmos shared with the viewer
// - `modes`: top-level navigation
// - `screens`: what each mode updates and draws

pub mod combat;
pub mod entities;
pub mod modes;
pub mod scenery;
pub mod screens;
pub mod session;
pub mod tuning;
