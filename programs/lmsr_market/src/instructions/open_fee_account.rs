use anchor_lang::prelude::*;

use crate::state::FeeAccount;

#[derive(Accounts)]
#[instruction(holder: Pubkey)]
pub struct OpenFeeAccount<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + FeeAccount::INIT_SPACE,
        seeds = [FeeAccount::SEED, holder.as_ref()],
        bump,
    )]
    pub fee_account: Account<'info, FeeAccount>,

    pub system_program: Program<'info, System>,
}

impl<'info> OpenFeeAccount<'info> {
    pub fn open_fee_account(&mut self, holder: Pubkey, bumps: &OpenFeeAccountBumps) -> Result<()> {
        self.fee_account.set_inner(FeeAccount {
            holder,
            amount: 0,
            bump: bumps.fee_account,
        });

        msg!("Fee account opened for {}", holder);

        Ok(())
    }
}
