/// On/off state of one sequencer step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Off,
    On,
}

impl CellState {
    pub fn toggled(self) -> Self {
        match self {
            CellState::Off => CellState::On,
            CellState::On => CellState::Off,
        }
    }
}

/// One step of the sequencer grid.
///
/// `left_connected`/`right_connected` chain neighbouring cells of a row into a
/// single sustained note. Hover and selection are presentation-only and never
/// survive a copy of the pattern (see [`Cell::settled`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    state: CellState,
    left_connected: bool,
    right_connected: bool,
    selected: bool,
    hovered: bool,
}

impl Cell {
    /// A lone note: on, with no connections.
    pub fn on() -> Self {
        Self { state: CellState::On, ..Self::default() }
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == CellState::On
    }

    pub fn is_left_connected(&self) -> bool {
        self.left_connected
    }

    pub fn is_right_connected(&self) -> bool {
        self.right_connected
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_state(&mut self, state: CellState) -> &mut Self {
        self.state = state;
        self
    }

    pub fn set_left_connected(&mut self, connected: bool) -> &mut Self {
        self.left_connected = connected;
        self
    }

    pub fn set_right_connected(&mut self, connected: bool) -> &mut Self {
        self.right_connected = connected;
        self
    }

    pub fn set_selected(&mut self, selected: bool) -> &mut Self {
        self.selected = selected;
        self
    }

    pub fn set_hovered(&mut self, hovered: bool) -> &mut Self {
        self.hovered = hovered;
        self
    }

    /// Off with both connections dropped. Neighbours are not touched; use
    /// `Pattern::set_cell_state` when the row has to stay consistent.
    pub fn turn_off(&mut self) -> &mut Self {
        self.set_state(CellState::Off)
            .set_left_connected(false)
            .set_right_connected(false)
    }

    /// Copies state and connections from `other`, keeping this cell's hover
    /// and selection.
    pub fn assign(&mut self, other: &Cell) -> &mut Self {
        self.set_state(other.state)
            .set_left_connected(other.left_connected)
            .set_right_connected(other.right_connected)
    }

    /// The persistent part of the cell: state and connections only.
    pub fn settled(&self) -> Cell {
        Cell {
            state: self.state,
            left_connected: self.left_connected,
            right_connected: self.right_connected,
            ..Cell::default()
        }
    }
}
