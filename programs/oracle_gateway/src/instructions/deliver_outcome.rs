//! Outcome Delivery
//!
//! Invokes the callback selector recorded on a fulfilled request. Anyone may
//! crank it. A rejected callback aborts only this transaction: the recorded
//! outcome stays on the request and delivery can be retried.
//!
//! Remaining accounts are forwarded to the callback after the gateway
//! authority, in order (for the market: its config, then the pool).

use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
};

use crate::errors::GatewayError;
use crate::state::{GatewayConfig, Outcome, Request, AUTHORITY_SEED};

/// Event emitted once the callback program accepted the outcome
#[event]
pub struct OutcomeDelivered {
    pub request_id: u64,
    pub pool_id: u64,
    pub outcome: Outcome,
    pub callback_program: Pubkey,
}

#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct DeliverOutcome<'info> {
    pub cranker: Signer<'info>,

    #[account(
        seeds = [GatewayConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, GatewayConfig>,

    /// CHECK: data-less PDA, signs the callback
    #[account(seeds = [AUTHORITY_SEED], bump = config.authority_bump)]
    pub authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [Request::SEED, request_id.to_le_bytes().as_ref()],
        bump = request.bump,
    )]
    pub request: Account<'info, Request>,

    /// CHECK: must be the program recorded on the request
    #[account(
        executable,
        address = request.callback_program @ GatewayError::CallbackMismatch,
    )]
    pub callback_program: UncheckedAccount<'info>,
}

/// Gateway authority first as the only signer, then the forwarded accounts
/// with their writability preserved
fn callback_metas(authority: Pubkey, forwarded: &[AccountInfo]) -> Vec<AccountMeta> {
    let mut metas = Vec::with_capacity(forwarded.len() + 1);
    metas.push(AccountMeta::new_readonly(authority, true));
    metas.extend(forwarded.iter().map(|account| {
        if account.is_writable {
            AccountMeta::new(*account.key, false)
        } else {
            AccountMeta::new_readonly(*account.key, false)
        }
    }));
    metas
}

pub fn deliver_outcome<'info>(
    ctx: Context<'_, '_, 'info, 'info, DeliverOutcome<'info>>,
    request_id: u64,
) -> Result<()> {
    require!(
        !ctx.remaining_accounts.is_empty(),
        GatewayError::MissingCallbackAccounts
    );

    let accounts = ctx.accounts;
    let outcome = accounts.request.take_for_delivery()?;

    let authority = accounts.authority.to_account_info();
    let metas = callback_metas(authority.key(), ctx.remaining_accounts);
    let mut infos = vec![authority];
    infos.extend(ctx.remaining_accounts.iter().cloned());
    infos.push(accounts.callback_program.to_account_info());

    let instruction = Instruction {
        program_id: accounts.request.callback_program,
        accounts: metas,
        data: accounts.request.callback_data(),
    };

    let authority_seeds = &[AUTHORITY_SEED, &[accounts.config.authority_bump]];
    invoke_signed(&instruction, &infos, &[&authority_seeds[..]])?;

    emit!(OutcomeDelivered {
        request_id,
        pool_id: accounts.request.pool_id,
        outcome,
        callback_program: accounts.request.callback_program,
    });

    msg!("Request {} delivered: {:?}", request_id, outcome);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_metas_order_and_flags() {
        let authority = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let config_key = Pubkey::new_unique();
        let pool_key = Pubkey::new_unique();
        let (mut config_lamports, mut pool_lamports) = (1_u64, 1_u64);
        let (mut config_data, mut pool_data) = ([0_u8; 8], [0_u8; 8]);

        let forwarded = [
            AccountInfo::new(
                &config_key,
                false,
                false,
                &mut config_lamports,
                &mut config_data,
                &owner,
                false,
                0,
            ),
            AccountInfo::new(
                &pool_key,
                true,
                true,
                &mut pool_lamports,
                &mut pool_data,
                &owner,
                false,
                0,
            ),
        ];

        let metas = callback_metas(authority, &forwarded);
        assert_eq!(
            metas,
            vec![
                AccountMeta::new_readonly(authority, true),
                AccountMeta::new_readonly(config_key, false),
                AccountMeta::new(pool_key, false),
            ]
        );
    }

    #[test]
    fn test_callback_metas_without_forwarded_accounts() {
        let authority = Pubkey::new_unique();
        let metas = callback_metas(authority, &[]);
        assert_eq!(metas, vec![AccountMeta::new_readonly(authority, true)]);
    }
}
