//! Key reference shown in the help panel

use super::Mode;

pub const DEFAULT_HELP_TITLE: &str = "Panels Help";
pub const WINDOW_HELP_TITLE: &str = "Window Mode Help";
pub const ZOOM_HELP_TITLE: &str = "Zoom Mode Help";

const DEFAULT_HELP: &str = "\
Panels
 |        split vertically
 -        split horizontally
 X        close panel
 tab      next panel, BackTab previous
 z        swap with the first panel
 p P      rotate panel contents
 i I      rotate sub-commands
 e        edit title, command, cache
 \"        create a panel from the list
 f F      add filter, clear filters
 &        toggle cache
 c        cursor mode
 hjkl     scroll
 D G *    disassembly, graph, decompiler
Modes
 m        menu
 w        window mode
 Enter    zoom
 ?        this help
Commands
 :        run a command
 ;        add comment
 g .      seek, seek to program counter
 u U      undo, redo seek
 s S      step in, step over
 [ ]      hexdump columns
 a        auto update
 C        cycle colors
 (        snow
 t T      tab prompt, close tab
 q Q      close tab, quit";

const WINDOW_HELP: &str = "\
Window mode
 hjkl     move to the next panel
 HJKL     resize
 n N      new panel, split vertically / horizontally
 X        close panel
 tab      next panel
 Enter    zoom
 q w      leave window mode";

const ZOOM_HELP: &str = "\
Zoom mode
 tab      zoom the next panel, BackTab previous
 ?        help
 q Q      leave zoom
 Enter    leave zoom";

/// Title and text of the help panel for `mode`
pub fn help_for(mode: Mode) -> (&'static str, &'static str) {
    match mode {
        Mode::Window => (WINDOW_HELP_TITLE, WINDOW_HELP),
        Mode::Zoom => (ZOOM_HELP_TITLE, ZOOM_HELP),
        Mode::Default | Mode::Menu => (DEFAULT_HELP_TITLE, DEFAULT_HELP),
    }
}
