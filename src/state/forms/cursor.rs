//! Keyboard focus within the job form

/// Which field has focus, and which option inside a choice group.
///
/// Both positions wrap around at either end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormCursor {
    pub field: usize,
    pub option: usize,
}

impl FormCursor {
    /// Move to the next field, resetting the option cursor
    pub fn next_field(&mut self, field_count: usize) {
        if field_count == 0 {
            return;
        }
        self.field = (self.field + 1) % field_count;
        self.option = 0;
    }

    /// Move to the previous field, resetting the option cursor
    pub fn prev_field(&mut self, field_count: usize) {
        if field_count == 0 {
            return;
        }
        self.field = if self.field == 0 {
            field_count - 1
        } else {
            self.field - 1
        };
        self.option = 0;
    }

    pub fn next_option(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        self.option = (self.option + 1) % option_count;
    }

    pub fn prev_option(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        self.option = if self.option == 0 {
            option_count - 1
        } else {
            self.option - 1
        };
    }
}
